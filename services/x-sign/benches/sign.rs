// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use once_cell::sync::Lazy;
use reqgate_core::{Context, SignRequest};
use reqgate_x_sign::Credential;
use reqgate_x_sign::RequestSigner;

criterion_group!(benches, bench);
criterion_main!(benches);

static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("must success")
});

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("x_sign");

    let cred = Credential::new("eyJhbGciOiJIUzI1NiJ9.bench-token");
    let signer = RequestSigner::new();
    let ctx = Context::new();

    group.bench_function("get", |b| {
        b.to_async(&*RUNTIME).iter(|| async {
            let (mut parts, _) = http::Request::get("http://127.0.0.1:9000/api/v1/projects?page=1")
                .header("x-project-id", "42")
                .body(())
                .expect("request must be valid")
                .into_parts();

            signer
                .sign_request(&ctx, &mut parts, b"", Some(&cred))
                .await
                .expect("must success")
        })
    });

    group.bench_function("post_json", |b| {
        let body = json_body();

        b.to_async(&*RUNTIME).iter(|| async {
            let (mut parts, _) = http::Request::post("http://127.0.0.1:9000/api/v1/apis")
                .header("content-type", "application/json")
                .header("x-project-id", "42")
                .body(())
                .expect("request must be valid")
                .into_parts();

            signer
                .sign_request(&ctx, &mut parts, &body, Some(&cred))
                .await
                .expect("must success")
        })
    });

    group.finish()
}

fn json_body() -> Vec<u8> {
    let fields = (0..64)
        .map(|i| format!(r#""field_{i}":{{"type":"string","value":"v{i}"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{fields}}}").into_bytes()
}
