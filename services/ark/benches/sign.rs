use bytes::Bytes;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use http::Method;
use volcsign_ark::{Credential, RequestSigner, SignableRequest};
use volcsign_core::{Context, SignRequest};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("ark");

    let cred = Credential::new("access_key_id", "secret_access_key", "cn-beijing");
    let signer = RequestSigner::new("ark");

    group.bench_function("sign", |b| {
        b.iter(|| {
            let req = SignableRequest::new(Method::GET, "open.volcengineapi.com", "ark")
                .with_query("Action", "ListEndpoints")
                .with_query("Version", "2024-01-01")
                .with_query("PageSize", "100");
            signer.sign(&cred, &req)
        })
    });

    group.bench_function("sign_request", |b| {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("must success");
        let ctx = Context::new();
        let body = Bytes::from_static(br#"{"hello":"world"}"#);

        b.to_async(&runtime).iter(|| async {
            let mut req = http::Request::new(());
            *req.method_mut() = Method::POST;
            *req.uri_mut() = "https://open.volcengineapi.com/?Action=ListEndpoints"
                .parse()
                .expect("url must be valid");

            let (mut parts, _) = req.into_parts();
            signer
                .sign_request(&ctx, &mut parts, &body, Some(&cred))
                .await
                .expect("must success")
        })
    });

    group.finish();
}
