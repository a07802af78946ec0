mod param_form;
mod plot_view;

pub use param_form::ParamForm;
pub use plot_view::PlotView;
