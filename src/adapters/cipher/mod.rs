pub mod age_envelope;
