//! reqwest-backed implementation of [`HospitalApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiError, ApiResult, HospitalApi, PatientQuery, SurgeryQuery, WriteOutcome};
use crate::models::{
    Doctor, NewPatient, NewSurgery, Notification, OperatingRoom, Patient, RecordId, Restock,
    StatusUpdate, Supply, Surgery,
};

/// HTTP client for the hospital REST API.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:5000`).
    ///
    /// Requests carry no timeout unless one is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// GET and decode; non-2xx is an error.
    async fn read<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> ApiResult<T> {
        let url = self.url(path);
        debug!(url = %url, ?params, "GET");

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "read failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a write and return its JSON body whatever the status code; the
    /// backend reports refusals in the body.
    async fn write<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Value> {
        let url = self.url(path);
        debug!(url = %url, method = %method, "write");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(url = %url, status = status.as_u16(), error = %e, "write response was not JSON");
            ApiError::Decode(e)
        })
    }
}

#[async_trait]
impl HospitalApi for HttpApi {
    async fn list_patients(&self, query: &PatientQuery) -> ApiResult<Vec<Patient>> {
        self.read("patients", &query.params()).await
    }

    async fn get_patient(&self, id: RecordId) -> ApiResult<Patient> {
        self.read(&format!("patients/{}", id), &[]).await
    }

    async fn patient_surgeries(&self, id: RecordId) -> ApiResult<Vec<Surgery>> {
        self.read(&format!("patients/{}/surgeries", id), &[]).await
    }

    async fn create_patient(&self, patient: &NewPatient) -> ApiResult<WriteOutcome<RecordId>> {
        let body = self.write(Method::POST, "patients", Some(patient)).await?;
        Ok(WriteOutcome::from_create_response(&body))
    }

    async fn list_surgeries(&self, query: &SurgeryQuery) -> ApiResult<Vec<Surgery>> {
        self.read("surgeries", &query.params()).await
    }

    async fn get_surgery(&self, id: RecordId) -> ApiResult<Surgery> {
        self.read(&format!("surgeries/{}", id), &[]).await
    }

    async fn create_surgery(&self, surgery: &NewSurgery) -> ApiResult<WriteOutcome<RecordId>> {
        let body = self.write(Method::POST, "surgeries", Some(surgery)).await?;
        Ok(WriteOutcome::from_create_response(&body))
    }

    async fn update_surgery_status(
        &self,
        id: RecordId,
        update: &StatusUpdate,
    ) -> ApiResult<WriteOutcome<()>> {
        let path = format!("surgeries/{}/status", id);
        let body = self.write(Method::PUT, &path, Some(update)).await?;
        Ok(WriteOutcome::from_update_response(&body))
    }

    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.read("doctors", &[]).await
    }

    async fn list_operating_rooms(&self) -> ApiResult<Vec<OperatingRoom>> {
        self.read("operating-rooms", &[]).await
    }

    async fn list_supplies(&self) -> ApiResult<Vec<Supply>> {
        self.read("medical-supplies", &[]).await
    }

    async fn get_supply(&self, id: RecordId) -> ApiResult<Supply> {
        self.read(&format!("medical-supplies/{}", id), &[]).await
    }

    async fn restock_supply(&self, id: RecordId, restock: &Restock) -> ApiResult<WriteOutcome<()>> {
        let path = format!("medical-supplies/{}/restock", id);
        let body = self.write(Method::PUT, &path, Some(restock)).await?;
        Ok(WriteOutcome::from_update_response(&body))
    }

    async fn list_notifications(&self) -> ApiResult<Vec<Notification>> {
        self.read("notifications", &[]).await
    }

    async fn mark_notification_read(&self, id: RecordId) -> ApiResult<WriteOutcome<()>> {
        let path = format!("notifications/{}/read", id);
        let body = self.write(Method::PUT, &path, None::<&Value>).await?;
        Ok(WriteOutcome::from_update_response(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpApi::new("http://localhost:5000/", None).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(api.url("operating-rooms"), "http://localhost:5000/api/operating-rooms");
    }
}
