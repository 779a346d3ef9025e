mod model;

pub use model::OperatorAccountBalance;
