mod metrics_calculator;


pub use metrics_calculator::*;
