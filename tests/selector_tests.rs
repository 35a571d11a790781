use brrtrouter_actions::runtime_config::RuntimeConfig;
use brrtrouter_actions::{
    resolve, ActionInventory, ActionRequest, ActionSelector, ControllerId, ControllerMetadata,
    ControllerSpec, HandlerMeta, ParameterMeta, Resolution, SelectionError,
};
use http::Method;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn widgets() -> ControllerSpec {
    ControllerSpec::new("Widgets")
        .handler(HandlerMeta::new("Get").method(Method::GET))
        .handler(
            HandlerMeta::new("Get")
                .method(Method::GET)
                .param(ParameterMeta::path("id", "i64")),
        )
        .handler(
            HandlerMeta::new("Find")
                .method(Method::GET)
                .param(ParameterMeta::query("name", "String")),
        )
        .handler(
            HandlerMeta::new("Find")
                .method(Method::GET)
                .param(ParameterMeta::query("code", "String")),
        )
        .handler(
            HandlerMeta::new("Archive")
                .method(Method::PUT)
                .param(ParameterMeta::path("id", "i64")),
        )
}

fn selector() -> ActionSelector {
    ActionSelector::with_config(RuntimeConfig::default())
}

fn get() -> brrtrouter_actions::action::ActionRequestBuilder {
    ActionRequest::builder()
        .method(Method::GET)
        .controller("Widgets")
}

#[test]
fn test_bare_get_resolves_parameterless_handler() {
    let action = selector()
        .select(&widgets(), &get().build().unwrap())
        .unwrap();
    assert_eq!(action.signature(), "Widgets::Get()");
}

#[test]
fn test_route_value_picks_more_specific_handler() {
    let request = get().route_value("id", "7").build().unwrap();
    let action = selector().select(&widgets(), &request).unwrap();
    assert_eq!(action.signature(), "Widgets::Get(id: i64)");
    assert_eq!(action.required_parameters().len(), 1);
}

#[test]
fn test_post_without_post_handlers_is_method_not_allowed() {
    let request = ActionRequest::builder()
        .method(Method::POST)
        .controller("Widgets")
        .build()
        .unwrap();
    let err = selector().select(&widgets(), &request).unwrap_err();
    assert!(matches!(err, SelectionError::MethodNotAllowed(ref m) if *m == Method::POST));
    assert_eq!(err.status_code(), 405);
    assert!(err.is_user_facing());
}

#[test]
fn test_two_equally_specific_handlers_are_ambiguous() {
    let request = get()
        .action("Find")
        .query_string("?name=x&code=y")
        .build()
        .unwrap();
    let err = selector().select(&widgets(), &request).unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(!err.is_user_facing());
    let mut conflicts = err.conflicting_signatures();
    conflicts.sort_unstable();
    assert_eq!(
        conflicts,
        vec!["Widgets::Find(code: String)", "Widgets::Find(name: String)"]
    );
    let message = err.to_string();
    assert!(message.starts_with("multiple actions on Widgets match the request:"));
    assert!(message.contains("\n  Widgets::Find(name: String)"));
}

#[test]
fn test_unknown_action_is_not_found() {
    let request = get().action("Missing").build().unwrap();
    let err = selector().select(&widgets(), &request).unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "no action named 'Missing' on Widgets");
}

#[test]
fn test_known_action_wrong_verb_is_method_not_allowed_not_not_found() {
    let request = get().action("archive").route_value("id", "3").build().unwrap();
    let err = selector().select(&widgets(), &request).unwrap_err();
    assert!(matches!(err, SelectionError::MethodNotAllowed(_)));
}

#[test]
fn test_action_name_is_case_insensitive() {
    let request = ActionRequest::builder()
        .method(Method::PUT)
        .controller("widgets")
        .action("ARCHIVE")
        .route_value("ID", "3")
        .build()
        .unwrap();
    let action = selector().select(&widgets(), &request).unwrap();
    assert_eq!(action.name(), "Archive");
}

#[test]
fn test_missing_required_parameter_is_not_found() {
    let request = ActionRequest::builder()
        .method(Method::PUT)
        .controller("Widgets")
        .action("Archive")
        .build()
        .unwrap();
    let err = selector().select(&widgets(), &request).unwrap_err();
    assert_eq!(err.to_string(), "no action on Widgets matches the request");
}

#[test]
fn test_resolved_handler_requirements_are_satisfied() {
    let controller = widgets();
    let inventory = ActionInventory::build(&controller);
    let shapes: [&[(&str, &str)]; 4] = [
        &[],
        &[("id", "1")],
        &[("name", "n")],
        &[("id", "1"), ("unrelated", "u")],
    ];
    for shape in shapes {
        let request = get().route_values(shape.iter().copied()).build().unwrap();
        if let Resolution::Resolved(action) = resolve(&request, &inventory) {
            for required in action.required_parameters() {
                assert!(
                    shape.iter().any(|(k, _)| k.eq_ignore_ascii_case(required)),
                    "{} resolved without {}",
                    action.signature(),
                    required
                );
            }
        }
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let controller = widgets();
    let inventory = ActionInventory::build(&controller);
    let requests = [
        get().build().unwrap(),
        get().route_value("id", "9").build().unwrap(),
        get().action("Find").query_string("name=a&code=b").build().unwrap(),
    ];
    for request in &requests {
        let first = resolve(request, &inventory);
        for _ in 0..16 {
            let again = resolve(request, &inventory);
            match (&first, &again) {
                (Resolution::Resolved(a), Resolution::Resolved(b)) => {
                    assert_eq!(a.identity(), b.identity())
                }
                (Resolution::Ambiguous(a), Resolution::Ambiguous(b)) => {
                    let a: Vec<_> = a.iter().map(|d| d.identity()).collect();
                    let b: Vec<_> = b.iter().map(|d| d.identity()).collect();
                    assert_eq!(a, b);
                }
                _ => panic!("outcome kind changed between calls"),
            }
        }
    }
}

#[test]
fn test_selector_rejects_misrouted_request() {
    let request = ActionRequest::builder()
        .method(Method::GET)
        .controller("Gadgets")
        .build()
        .unwrap();
    let err = selector().select(&widgets(), &request).unwrap_err();
    assert!(matches!(err, SelectionError::InvalidArgument(_)));
}

#[test]
fn test_selector_rejects_unnamed_controller() {
    let controller = ControllerSpec::new("").handler(HandlerMeta::new("Get"));
    let request = ActionRequest::builder().method(Method::GET).build().unwrap();
    let err = selector().select(&controller, &request).unwrap_err();
    assert!(matches!(err, SelectionError::InvalidArgument(_)));
}

#[test]
fn test_prewarm_respects_config() {
    let a = widgets();
    let b = ControllerSpec::new("Orders").handler(HandlerMeta::new("Get"));
    let warm = selector();
    assert_eq!(warm.prewarm(&[&a, &b]), 2);

    let cold = ActionSelector::with_config(RuntimeConfig {
        prewarm_inventory: false,
        ..RuntimeConfig::default()
    });
    assert_eq!(cold.prewarm(&[&a, &b]), 0);
}

#[test]
fn test_mapping_groups_overloads() {
    let mapping = selector().mapping(&widgets());
    assert_eq!(mapping.len(), 3);
    assert_eq!(mapping.get("get").len(), 2);
    assert_eq!(mapping.get("FIND").len(), 2);
    assert!(!mapping.contains("Delete"));
}

#[test]
fn test_non_ascii_action_name_matches_any_case() {
    let controller =
        ControllerSpec::new("Städte").handler(HandlerMeta::new("Über").method(Method::GET));
    let request = ActionRequest::builder()
        .method(Method::GET)
        .controller("STÄDTE")
        .action("über")
        .build()
        .unwrap();
    let action = selector().select(&controller, &request).unwrap();
    assert_eq!(action.name(), "Über");
}

#[test]
fn test_non_ascii_parameter_name_matches_any_case() {
    let controller = ControllerSpec::new("W")
        .handler(HandlerMeta::new("Get").method(Method::GET))
        .handler(
            HandlerMeta::new("Get")
                .method(Method::GET)
                .param(ParameterMeta::query("Größe", "u32")),
        );
    let request = ActionRequest::builder()
        .method(Method::GET)
        .controller("W")
        .query_string("gr%C3%96%C3%9Fe=4")
        .build()
        .unwrap();
    let action = selector().select(&controller, &request).unwrap();
    assert_eq!(action.signature(), "W::Get(Größe: u32)");
}

fn reports() -> ControllerSpec {
    ControllerSpec::new("Reports").handler(
        HandlerMeta::new("Run")
            .method(Method::GET)
            .extra_uri_parameter("tenant"),
    )
}

#[test]
fn test_extra_uri_parameter_alone_gates_selection() {
    let bare = ActionRequest::builder()
        .method(Method::GET)
        .controller("Reports")
        .build()
        .unwrap();
    let err = selector().select(&reports(), &bare).unwrap_err();
    assert!(matches!(err, SelectionError::NotFound(_)));

    let with_tenant = ActionRequest::builder()
        .method(Method::GET)
        .controller("Reports")
        .query_string("?tenant=a")
        .build()
        .unwrap();
    let action = selector().select(&reports(), &with_tenant).unwrap();
    assert_eq!(action.name(), "Run");
}

/// Controller whose handler list is slow to produce, so inventory builds are slow.
struct SlowToDescribe {
    spec: ControllerSpec,
}

impl ControllerMetadata for SlowToDescribe {
    fn id(&self) -> ControllerId {
        self.spec.id()
    }

    fn name(&self) -> &str {
        self.spec.name()
    }

    fn handlers(&self) -> &[HandlerMeta] {
        std::thread::sleep(Duration::from_millis(30));
        self.spec.handlers()
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_inventory_build_is_not_counted_as_slow_selection() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let controller = SlowToDescribe { spec: widgets() };
    let selector = ActionSelector::with_config(RuntimeConfig {
        slow_select_threshold: Duration::from_millis(20),
        ..RuntimeConfig::default()
    });
    let request = get().route_value("id", "1").build().unwrap();

    tracing::subscriber::with_default(subscriber, || {
        let action = selector.select(&controller, &request).unwrap();
        assert_eq!(action.signature(), "Widgets::Get(id: i64)");
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("Action inventory built"));
    assert!(output.contains("Action selected"));
    assert!(!output.contains("Slow action selection detected"));
}
