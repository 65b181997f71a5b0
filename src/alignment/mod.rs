pub mod nearest;
pub mod polar;
