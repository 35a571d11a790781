use brrtrouter_actions::{
    resolve, ActionInventory, ActionRequest, ActionSelector, ControllerSpec, HandlerMeta,
    ParameterMeta,
};
use brrtrouter_actions::runtime_config::RuntimeConfig;
use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use std::hint::black_box;

fn zoo() -> ControllerSpec {
    ControllerSpec::new("Animals")
        .handler(HandlerMeta::new("Get").method(Method::GET))
        .handler(
            HandlerMeta::new("Get")
                .method(Method::GET)
                .param(ParameterMeta::path("id", "u64")),
        )
        .handler(
            HandlerMeta::new("Get")
                .method(Method::GET)
                .param(ParameterMeta::path("id", "u64"))
                .param(ParameterMeta::path("toy_id", "u64")),
        )
        .handler(
            HandlerMeta::new("Search")
                .method(Method::GET)
                .param(ParameterMeta::query("species", "String"))
                .param(ParameterMeta::query("limit", "u32").optional()),
        )
        .handler(HandlerMeta::new("Post").param(ParameterMeta::body("animal", "Animal")))
        .handler(
            HandlerMeta::new("Put")
                .param(ParameterMeta::path("id", "u64"))
                .param(ParameterMeta::body("animal", "Animal")),
        )
        .handler(HandlerMeta::new("Delete").param(ParameterMeta::path("id", "u64")))
        .handler(HandlerMeta::new("Options"))
}

fn requests() -> Vec<ActionRequest> {
    let base = || ActionRequest::builder().controller("Animals");
    vec![
        base().method(Method::GET).build(),
        base().method(Method::GET).route_value("id", "123").build(),
        base()
            .method(Method::GET)
            .route_value("id", "123")
            .route_value("toy_id", "456")
            .build(),
        base()
            .method(Method::GET)
            .action("search")
            .query_string("species=cat&limit=10")
            .build(),
        base().method(Method::PUT).route_value("id", "7").build(),
        base().method(Method::DELETE).route_value("id", "7").build(),
    ]
    .into_iter()
    .collect::<Result<_, _>>()
    .expect("valid bench requests")
}

fn bench_resolve(c: &mut Criterion) {
    let controller = zoo();
    let inventory = ActionInventory::build(&controller);
    let requests = requests();
    c.bench_function("action_resolve", |b| {
        b.iter(|| {
            for request in &requests {
                black_box(resolve(request, &inventory));
            }
        })
    });
}

fn bench_select_cached(c: &mut Criterion) {
    let controller = zoo();
    let selector = ActionSelector::with_config(RuntimeConfig::default());
    let requests = requests();
    c.bench_function("action_select_cached", |b| {
        b.iter(|| {
            for request in &requests {
                let _ = black_box(selector.select(&controller, request));
            }
        })
    });
}

fn bench_inventory_build(c: &mut Criterion) {
    let controller = zoo();
    c.bench_function("inventory_build", |b| {
        b.iter(|| black_box(ActionInventory::build(&controller)))
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_select_cached,
    bench_inventory_build
);
criterion_main!(benches);
