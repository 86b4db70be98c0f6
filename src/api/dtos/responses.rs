use serde::Serialize;

#[derive(Serialize)]
pub struct AffectedRows {
    pub affected_rows: u64,
}

impl From<u64> for AffectedRows {
    fn from(affected_rows: u64) -> Self {
        Self { affected_rows }
    }
}

#[derive(Serialize)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
