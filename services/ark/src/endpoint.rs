//! Wire types of the `ListEndpoints` control-plane action.

use crate::constants::STATUS_RUNNING;
use serde::{Deserialize, Deserializer};

/// Response of `ListEndpoints`.
///
/// A missing `Result` is valid and means there are no endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListEndpointsResponse {
    /// Request metadata, carrying the error if the call failed.
    #[serde(default)]
    pub response_metadata: ResponseMetadata,
    /// Result of a successful call.
    #[serde(default)]
    pub result: Option<ListEndpointsResult>,
}

impl ListEndpointsResponse {
    /// Consume the response and return its items, empty when there is no `Result`.
    pub fn into_items(self) -> Vec<EndpointItem> {
        self.result.map(|r| r.items).unwrap_or_default()
    }
}

/// `ResponseMetadata` block shared by all volcengine OpenAPI responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResponseMetadata {
    /// Request id, useful when reporting issues.
    pub request_id: String,
    /// Action that was called.
    pub action: String,
    /// API version that was called.
    pub version: String,
    /// Service that handled the call.
    pub service: String,
    /// Region that handled the call.
    pub region: String,
    /// Present when the call failed.
    pub error: Option<ApiError>,
}

/// Error reported by the API inside `ResponseMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ApiError {
    /// Machine readable error code, for example `InvalidAccessKey`.
    pub code: String,
    /// Human readable message.
    pub message: String,
}

/// `Result` block of `ListEndpoints`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListEndpointsResult {
    /// Endpoints on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<EndpointItem>,
    /// Total number of endpoints.
    #[serde(default)]
    pub total: u64,
}

/// An inference endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EndpointItem {
    /// Endpoint id, for example `ep-20240501123456-abcde`.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: EndpointStatus,
    /// Endpoint type.
    #[serde(default)]
    pub endpoint_type: Option<String>,
    /// Model served by this endpoint.
    #[serde(default)]
    pub model: Option<ModelInfo>,
    /// Foundation model this endpoint is built on.
    #[serde(default)]
    pub model_reference: Option<ModelReference>,
}

impl EndpointItem {
    /// Whether this endpoint can serve requests.
    pub fn is_running(&self) -> bool {
        self.status == EndpointStatus::Running
    }

    /// `<Name> (<Id>)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }

    /// Whether id, name or model name contain `filter`, ignoring case.
    ///
    /// `model_reference` is informational and never matched.
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        let model_name = self.model.as_ref().and_then(|m| m.name.as_deref());

        [Some(self.id.as_str()), Some(self.name.as_str()), model_name]
        .into_iter()
        .flatten()
        .any(|v| v.to_lowercase().contains(&filter))
    }
}

/// Lifecycle status of an endpoint.
///
/// Only `Running` matters to callers; everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EndpointStatus {
    /// The endpoint serves requests.
    Running,
    /// Any other status, such as `Stopped` or `Creating`.
    Other(String),
}

impl Default for EndpointStatus {
    fn default() -> Self {
        EndpointStatus::Other(String::new())
    }
}

impl From<String> for EndpointStatus {
    fn from(v: String) -> Self {
        if v == STATUS_RUNNING {
            EndpointStatus::Running
        } else {
            EndpointStatus::Other(v)
        }
    }
}

/// Model information attached to an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModelInfo {
    /// Model name.
    pub name: Option<String>,
    /// Model id.
    pub id: Option<String>,
}

/// Reference to the foundation model an endpoint is built on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModelReference {
    /// The foundation model.
    pub foundation_model: Option<FoundationModel>,
}

/// A foundation model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FoundationModel {
    /// Foundation model name.
    pub name: Option<String>,
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_list_endpoints() -> anyhow::Result<()> {
        let body = r#"{
            "ResponseMetadata": {
                "RequestId": "20240501123456",
                "Action": "ListEndpoints",
                "Version": "2024-01-01",
                "Service": "ark",
                "Region": "cn-beijing"
            },
            "Result": {
                "Items": [
                    {
                        "Id": "ep-1",
                        "Name": "Chat",
                        "Status": "Running",
                        "EndpointType": "Default",
                        "Model": {"Name": "doubao-pro-32k", "Id": "m-1"}
                    },
                    {
                        "Id": "ep-2",
                        "Name": "Embedding",
                        "Status": "Stopped",
                        "ModelReference": {"FoundationModel": {"Name": "doubao-embedding"}}
                    }
                ],
                "Total": 2
            }
        }"#;

        let resp: ListEndpointsResponse = serde_json::from_str(body)?;
        assert!(resp.response_metadata.error.is_none());
        assert_eq!(resp.response_metadata.region, "cn-beijing");

        let result = resp.result.clone().expect("result must exist");
        assert_eq!(result.total, 2);

        let items = resp.into_items();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_running());
        assert_eq!(items[0].label(), "Chat (ep-1)");
        assert_eq!(
            items[1].status,
            EndpointStatus::Other("Stopped".to_string())
        );
        assert!(items[1].matches("EMBEDDING"));
        Ok(())
    }

    #[test]
    fn test_decode_error_without_result() -> anyhow::Result<()> {
        let body = r#"{
            "ResponseMetadata": {
                "RequestId": "20240501123456",
                "Error": {"Code": "InvalidAccessKey", "Message": "The access key is invalid."}
            }
        }"#;

        let resp: ListEndpointsResponse = serde_json::from_str(body)?;
        assert_eq!(
            resp.response_metadata.error,
            Some(ApiError {
                code: "InvalidAccessKey".to_string(),
                message: "The access key is invalid.".to_string(),
            })
        );
        assert!(resp.into_items().is_empty());
        Ok(())
    }

    #[test]
    fn test_decode_null_items() -> anyhow::Result<()> {
        let resp: ListEndpointsResponse =
            serde_json::from_str(r#"{"ResponseMetadata": {}, "Result": {"Items": null}}"#)?;
        assert!(resp.into_items().is_empty());
        Ok(())
    }

    #[test]
    fn test_matches() {
        let item = EndpointItem {
            id: "ep-20240501-abc".to_string(),
            name: "Production Chat".to_string(),
            status: EndpointStatus::Running,
            model: Some(ModelInfo {
                name: Some("Doubao-Pro".to_string()),
                id: None,
            }),
            ..Default::default()
        };

        assert!(item.matches("EP-2024"));
        assert!(item.matches("production"));
        assert!(item.matches("doubao"));
        assert!(!item.matches("zz"));
    }

    #[test]
    fn test_matches_ignores_foundation_model() {
        let item = EndpointItem {
            id: "ep-2".to_string(),
            name: "Alpha".to_string(),
            status: EndpointStatus::Running,
            model_reference: Some(ModelReference {
                foundation_model: Some(FoundationModel {
                    name: Some("doubao-lite".to_string()),
                }),
            }),
            ..Default::default()
        };

        assert!(!item.matches("lite"));
        assert!(item.matches("alpha"));
    }
}
