pub mod payment_setup;
