use mika::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ===== Test Services =====

#[derive(Debug, Default)]
struct StreamFactory;

#[derive(Debug)]
struct Mailer {
    streams: Arc<StreamFactory>,
    sender: String,
    retries: i64,
}

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    catalog.define(TypeDef::<StreamFactory>::new("App\\StreamFactory").default_constructor());
    catalog.define(
        TypeDef::<Mailer>::new("App\\Mailer")
            .constructor(
                [MethodParameter::service("streams", "App\\StreamFactoryInterface")],
                |args| {
                    Ok(Mailer {
                        streams: args.service("streams")?,
                        sender: "noreply".to_string(),
                        retries: 0,
                    })
                },
            )
            .method(
                "configure",
                [
                    MethodParameter::service("streams", "App\\StreamFactoryInterface"),
                    MethodParameter::string("sender"),
                    MethodParameter::int("retries"),
                    MethodParameter::bool("verbose"),
                    MethodParameter::float("ratio"),
                    MethodParameter::untyped("extra"),
                ],
            ),
    );
    catalog
}

fn registry() -> ServiceRegistry {
    let mut registry = ServiceRegistry::new();
    registry.register("App\\StreamFactoryInterface", Some("App\\StreamFactory"));
    registry.register("App\\MailerInterface", Some("App\\Mailer"));
    registry
}

fn container() -> Container {
    Container::new(Arc::new(registry()), Arc::new(catalog()))
}

fn known(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

// ===== has / get =====

#[test]
fn test_has_reflects_bindings_only() {
    let mut registry = registry();
    registry.register("App\\Broken", Some("App\\DoesNotExist"));
    let container = Container::new(Arc::new(registry), Arc::new(catalog()));

    assert!(container.has("App\\MailerInterface"));
    assert!(container.has("App\\Broken"));
    assert!(!container.has("App\\Mailer"));
    assert!(matches!(container.get("App\\Broken"), Err(DiError::ClassNotFound(c)) if c == "App\\DoesNotExist"));
}

#[test]
fn test_get_unknown_service() {
    let error = container().get("App\\Unknown").unwrap_err();
    assert_eq!(error, DiError::ServiceNotFound("App\\Unknown".to_string()));
    assert_eq!(error.to_string(), "Service App\\Unknown is not found");
}

#[test]
fn test_get_builds_dependencies_recursively() {
    let container = container();
    let mailer = container.resolve::<Mailer>("App\\MailerInterface").unwrap();
    assert_eq!(mailer.sender, "noreply");
    let _: &StreamFactory = &mailer.streams;
}

#[test]
fn test_constructed_services_are_not_cached() {
    let container = container();
    let first = container.resolve::<Mailer>("App\\MailerInterface").unwrap();
    let second = container.resolve::<Mailer>("App\\MailerInterface").unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first.streams, &second.streams));
}

#[test]
fn test_registered_object_is_returned_verbatim() {
    let mut registry = registry();
    registry.register_object("App\\StreamFactoryInterface", StreamFactory);
    let container = Container::new(Arc::new(registry), Arc::new(catalog()));

    let a = container.resolve::<StreamFactory>("App\\StreamFactoryInterface").unwrap();
    let b = container.resolve::<StreamFactory>("App\\StreamFactoryInterface").unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let first = container.resolve::<Mailer>("App\\MailerInterface").unwrap();
    let second = container.resolve::<Mailer>("App\\MailerInterface").unwrap();
    assert!(Arc::ptr_eq(&first.streams, &second.streams));
    assert!(Arc::ptr_eq(&first.streams, &a));
}

#[test]
fn test_trait_object_registration() {
    let mut registry = ServiceRegistry::new();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(42));
    registry.register_object("App\\Clock", clock);
    let container = Container::new(Arc::new(registry), Arc::new(TypeCatalog::new()));

    let clock = container.resolve_trait::<dyn Clock>("App\\Clock").unwrap();
    assert_eq!(clock.now(), 42);
}

#[test]
fn test_wrong_type_is_mismatch() {
    let container = container();
    let error = container.resolve::<String>("App\\MailerInterface").unwrap_err();
    assert!(matches!(error, DiError::TypeMismatch { name, .. } if name == "App\\MailerInterface"));
}

// ===== create_object =====

#[test]
fn test_create_object_skips_bindings() {
    let container = container();
    let streams = container.create::<StreamFactory>("App\\StreamFactory");
    assert!(streams.is_ok());

    // Interfaces are bindings, not types.
    assert_eq!(
        container.create_object("App\\StreamFactoryInterface").unwrap_err(),
        DiError::ClassNotFound("App\\StreamFactoryInterface".to_string())
    );
}

#[test]
fn test_abstract_type_is_class_not_found() {
    let mut catalog = TypeCatalog::new();
    catalog.define(TypeDef::<StreamFactory>::new("App\\AbstractStreams"));
    let container = Container::new(Arc::new(ServiceRegistry::new()), Arc::new(catalog));

    assert_eq!(
        container.create_object("App\\AbstractStreams").unwrap_err(),
        DiError::ClassNotFound("App\\AbstractStreams".to_string())
    );
}

#[test]
fn test_factory_runs_once_per_construction() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut catalog = TypeCatalog::new();
    catalog.define(TypeDef::<StreamFactory>::new("App\\StreamFactory").constructor([], move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(StreamFactory)
    }));
    let container = Container::new(Arc::new(registry()), Arc::new(catalog));

    container.get("App\\StreamFactoryInterface").unwrap();
    container.get("App\\StreamFactoryInterface").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_circular_dependency_is_reported_with_path() {
    struct A;
    struct B;

    let mut catalog = TypeCatalog::new();
    catalog.define(TypeDef::<A>::new("A").constructor([MethodParameter::service("b", "BInterface")], |_| Ok(A)));
    catalog.define(TypeDef::<B>::new("B").constructor([MethodParameter::service("a", "AInterface")], |_| Ok(B)));

    let mut registry = ServiceRegistry::new();
    registry.register("AInterface", Some("A"));
    registry.register("BInterface", Some("B"));
    let container = Container::new(Arc::new(registry), Arc::new(catalog));

    let error = container.get("AInterface").unwrap_err();
    assert_eq!(
        error,
        DiError::Circular(vec!["A".to_string(), "B".to_string(), "A".to_string()])
    );
    assert_eq!(error.to_string(), "Circular dependency: A -> B -> A");

    // The construction stack unwinds after a failure.
    assert_eq!(container.get("BInterface").unwrap_err(), DiError::Circular(vec![
        "B".to_string(),
        "A".to_string(),
        "B".to_string(),
    ]));
}

// ===== create_method_depends =====

#[test]
fn test_method_depends_binds_and_casts() {
    let container = container();
    let args = container
        .create_method_depends(
            "App\\Mailer",
            "configure",
            &known(&[
                ("sender", "ops"),
                ("retries", "3 times"),
                ("verbose", "0"),
                ("ratio", "0.5"),
                ("extra", "42"),
                ("ignored", "x"),
            ]),
        )
        .unwrap();

    assert_eq!(
        args.names().collect::<Vec<_>>(),
        ["streams", "sender", "retries", "verbose", "ratio", "extra"]
    );
    assert!(args.service::<StreamFactory>("streams").is_ok());
    assert_eq!(args.get("sender"), Some(&Value::Str("ops".to_string())));
    assert_eq!(args.get("retries"), Some(&Value::Int(3)));
    assert_eq!(args.get("verbose"), Some(&Value::Bool(false)));
    assert_eq!(args.get("ratio"), Some(&Value::Float(0.5)));
    assert_eq!(args.get("extra"), Some(&Value::Raw("42".to_string())));
    assert!(!args.contains("ignored"));
}

#[test]
fn test_method_depends_missing_argument() {
    let error = container()
        .create_method_depends("App\\Mailer", "configure", &known(&[("sender", "ops")]))
        .unwrap_err();

    assert_eq!(
        error,
        DiError::MissingMethodArgument {
            parameter: "retries".to_string(),
            method: "configure".to_string(),
        }
    );
    assert_eq!(error.to_string(), "Missing argument retries for method configure");
}

#[test]
fn test_method_depends_missing_untyped_argument() {
    let mut catalog = TypeCatalog::new();
    catalog.define(TypeDef::<StreamFactory>::new("App\\Tagger").method("tag", [MethodParameter::untyped("label")]));
    let container = Container::new(Arc::new(ServiceRegistry::new()), Arc::new(catalog));

    let error = container
        .create_method_depends("App\\Tagger", "tag", &HashMap::new())
        .unwrap_err();
    assert_eq!(
        error,
        DiError::MissingMethodArgument {
            parameter: "label".to_string(),
            method: "tag".to_string(),
        }
    );

    let args = container
        .create_method_depends("App\\Tagger", "tag", &known(&[("label", "")]))
        .unwrap();
    assert_eq!(args.get("label"), Some(&Value::Raw(String::new())));
}

#[test]
fn test_method_depends_unknown_method() {
    let error = container()
        .create_method_depends("App\\Mailer", "send", &HashMap::new())
        .unwrap_err();
    assert_eq!(error.to_string(), "Method App\\Mailer::send() does not exist");
}

#[test]
fn test_constructor_without_declaration_has_no_depends() {
    let args = container()
        .create_method_depends("App\\Unknown", CONSTRUCTOR, &HashMap::new())
        .unwrap();
    assert!(args.is_empty());
}

#[test]
fn test_known_values_do_not_override_services() {
    let args = container()
        .create_method_depends(
            "App\\Mailer",
            "configure",
            &known(&[
                ("streams", "not a service"),
                ("sender", "ops"),
                ("retries", "1"),
                ("verbose", "1"),
                ("ratio", "1"),
                ("extra", ""),
            ]),
        )
        .unwrap();
    assert!(matches!(args.get("streams"), Some(Value::Service(_))));
}

// ===== Request-local overlay =====

#[test]
fn test_overlay_shadows_shared_registry() {
    let shared = Arc::new(registry());
    let mut container = Container::new(shared.clone(), Arc::new(catalog()));
    container.register_object("App\\StreamFactoryInterface", StreamFactory);
    container.register("App\\Extra", Some("App\\StreamFactory"));

    let a = container.resolve::<StreamFactory>("App\\StreamFactoryInterface").unwrap();
    let b = container.resolve::<StreamFactory>("App\\StreamFactoryInterface").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(container.has("App\\Extra"));

    // The shared registry is untouched.
    assert!(shared.object("App\\StreamFactoryInterface").is_none());
    assert!(!shared.contains("App\\Extra"));
    let other = Container::new(shared, Arc::new(catalog()));
    assert!(!other.has("App\\Extra"));
}

#[test]
fn test_mailer_fields_survive_factory() {
    let mailer = container().create::<Mailer>("App\\Mailer").unwrap();
    assert_eq!(mailer.retries, 0);
}

#[test]
fn test_declared_method_without_handler_is_not_callable() {
    let container = container();
    let mailer = container.create_object("App\\Mailer").unwrap();
    let error = container
        .call_action("App\\Mailer", "configure", &mailer, &Arguments::new())
        .unwrap_err();

    assert_eq!(
        error,
        DiError::MethodNotFound {
            type_name: "App\\Mailer".to_string(),
            method: "configure".to_string(),
        }
    );
}
