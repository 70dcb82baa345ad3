use anyhow::Result;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use pretty_assertions::assert_eq;
use volcsign_ark::{Credential, RequestSigner, SignableRequest};
use volcsign_core::time::parse_rfc3339;
use volcsign_core::{Context, SignRequest};

fn signer() -> Result<RequestSigner> {
    Ok(RequestSigner::new("ark").with_time(parse_rfc3339("2024-05-01T12:34:56Z")?))
}

fn credential() -> Credential {
    Credential::new("AKLTexample", "secretExample", "cn-beijing")
}

#[tokio::test]
async fn test_sign_post_parts() -> Result<()> {
    let body = Bytes::from_static(br#"{"hello":"world"}"#);
    let (mut parts, body) = http::Request::builder()
        .method(Method::POST)
        .uri("https://open.volcengineapi.com/?B=2&A=1%20%2B%201")
        .header(CONTENT_TYPE, "application/json")
        .body(body)?
        .into_parts();

    signer()?
        .sign_request(&Context::new(), &mut parts, &body, Some(&credential()))
        .await?;

    assert_eq!(parts.headers[CONTENT_TYPE], "application/json");
    assert_eq!(
        parts.headers["x-content-sha256"],
        "93a23971a914e5eacbf0a8d25154cda309c3c1c72fbb9914d47c60f3cb681588"
    );
    assert_eq!(
        parts.headers[AUTHORIZATION],
        "HMAC-SHA256 Credential=AKLTexample/20240501/cn-beijing/ark/request, \
         SignedHeaders=content-type;host;x-content-sha256;x-date, \
         Signature=49fe5385a0d8076d1fe6d6adb8ed4bc93dd2891a1c640fa95be90788c7b419c6"
    );
    Ok(())
}

#[test]
fn test_parts_and_signable_request_agree() -> Result<()> {
    let signer = signer()?;
    let (parts, _) = http::Request::builder()
        .uri("https://open.volcengineapi.com/?Version=2024-01-01&Action=ListEndpoints")
        .body(())?
        .into_parts();

    let from_parts = SignableRequest::from_parts(&parts, Bytes::new(), "ark")?;
    let built = SignableRequest::new(Method::GET, "open.volcengineapi.com", "ark")
        .with_query("Action", "ListEndpoints")
        .with_query("Version", "2024-01-01");

    assert_eq!(from_parts.url(), built.url());
    assert_eq!(
        signer.sign(&credential(), &from_parts),
        signer.sign(&credential(), &built)
    );
    Ok(())
}
