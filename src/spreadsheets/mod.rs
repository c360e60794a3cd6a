pub mod results_xlsx;

pub use results_xlsx::export_evaluated_xlsx;
