pub mod pv_estimator;
