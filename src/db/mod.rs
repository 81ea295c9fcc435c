pub mod health_samples;
