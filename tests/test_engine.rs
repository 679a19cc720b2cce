//! Embedding API tests: time limits, stopping, native registration, calling
//! script functions from Rust and configuration.

extern crate jsembed;

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use jsembed::runner::ds::execution_context::EvalContext;
use jsembed::runner::ds::object::JsObject;
use jsembed::runner::ds::value::JsValue;
use jsembed::runner::plugin::types::BuiltInObject;
use jsembed::{EngineConfig, JErrorType, JavascriptEngine};

fn string(s: &str) -> JsValue {
    JsValue::String(s.to_string())
}

fn engine_with_timeout(timeout: Duration) -> JavascriptEngine {
    JavascriptEngine::with_config(EngineConfig::new().with_maximum_execution_time(timeout))
}

// ============================================================================
// Time limits and stopping
// ============================================================================

mod cancellation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_infinite_loop_times_out() {
        let mut engine = engine_with_timeout(Duration::from_millis(50));
        let started = Instant::now();
        let err = engine.execute("while (true) {}").unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.message(), "Execution timed-out");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_runaway_recursion_through_calls_times_out() {
        let mut engine = engine_with_timeout(Duration::from_millis(50));
        engine.set_max_call_depth(1_000_000);
        engine
            .execute("function spin(n) { for (var i = 0; i < 1000; i++) {} return spin(n); }")
            .unwrap();
        let err = engine.evaluate("spin(1)").unwrap_err();
        assert_eq!(err.kind, JErrorType::TimeoutError("Execution timed-out".to_string()));
    }

    #[test]
    fn test_engine_is_usable_after_a_time_out() {
        let mut engine = engine_with_timeout(Duration::from_millis(20));
        assert!(engine.execute("for (;;) {}").is_err());
        assert_eq!(engine.evaluate("1 + 1").unwrap(), JsValue::integer(2));
    }

    #[test]
    fn test_timeout_can_be_changed_between_calls() {
        let mut engine = JavascriptEngine::new();
        assert_eq!(engine.maximum_execution_time(), Duration::from_secs(60));
        engine.set_maximum_execution_time(Duration::from_millis(30));
        assert_eq!(engine.maximum_execution_time(), Duration::from_millis(30));
        assert!(engine.execute("while (1) {}").unwrap_err().is_timeout());
    }

    #[test]
    fn test_stop_from_another_thread() {
        let mut engine = engine_with_timeout(Duration::from_secs(30));
        let handle = engine.stop_handle();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            handle.stop();
        });
        let err = engine.execute("var n = 0; while (true) { n++; }").unwrap_err();
        stopper.join().unwrap();
        assert_eq!(err.kind, JErrorType::TimeoutError("Interrupted".to_string()));
        // Progress made before the stop is kept.
        match engine.evaluate("n > 0").unwrap() {
            JsValue::Boolean(b) => assert!(b),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_stop_before_a_call_only_affects_that_call() {
        let mut engine = JavascriptEngine::new();
        engine.stop();
        // Each entry point restarts the deadline.
        assert_eq!(engine.evaluate("2 * 2").unwrap(), JsValue::integer(4));
    }
}

// ============================================================================
// Native registration
// ============================================================================

mod registration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shout(_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JErrorType> {
        match args.first() {
            Some(JsValue::String(s)) => Ok(JsValue::String(s.to_uppercase())),
            _ => Err(JErrorType::TypeError("shout expects a string".to_string())),
        }
    }

    #[test]
    fn test_registered_object_is_visible_and_shared() {
        let mut engine = JavascriptEngine::new();
        let mut settings = JsObject::new();
        settings.set_property("level", JsValue::integer(1));
        let handle = engine.register_native_object("Settings", settings);

        assert_eq!(engine.evaluate("Settings.level").unwrap(), JsValue::integer(1));
        handle.borrow_mut().set_property("level", JsValue::integer(3));
        assert_eq!(engine.evaluate("Settings.level").unwrap(), JsValue::integer(3));
        engine.execute("Settings.level = 9;").unwrap();
        assert_eq!(handle.borrow().get_property("level"), Some(JsValue::integer(9)));
    }

    #[test]
    fn test_deregistered_object_disappears() {
        let mut engine = JavascriptEngine::new();
        engine.register_native_object("Temp", JsObject::new());
        assert_eq!(engine.evaluate("typeof Temp").unwrap(), string("object"));
        engine.deregister_native_object("Temp");
        assert_eq!(engine.evaluate("typeof Temp").unwrap(), string("undefined"));
    }

    #[test]
    fn test_builtin_object_methods_and_errors() {
        let mut engine = JavascriptEngine::new();
        let text = BuiltInObject::new("Text").add_method("shout", shout);
        engine.register_native_object("Text", text.into_js_object());

        assert_eq!(engine.evaluate("Text.shout('hey')").unwrap(), string("HEY"));
        let err = engine.evaluate("Text.shout(1)").unwrap_err();
        assert_eq!(err.to_string(), "Line 1, column 11: shout expects a string");
    }

    #[test]
    fn test_registered_closure_keeps_state() {
        let mut engine = JavascriptEngine::new();
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(vec![]));
        let sink = seen.clone();
        engine.register_method("record", move |_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>| {
            for a in args {
                sink.borrow_mut().push(a.to_string());
            }
            Ok(JsValue::Undefined)
        });

        engine.execute("record('a', 1); for (var i = 0; i < 2; i++) record(i * 10);").unwrap();
        assert_eq!(*seen.borrow(), vec!["a", "1", "0", "10"]);
    }

    #[test]
    fn test_root_properties_in_insertion_order() {
        let mut engine = JavascriptEngine::with_config(EngineConfig::new().with_std_lib(false));
        engine.execute("var first = 1; var second = 'two';").unwrap();
        let names: Vec<String> = engine
            .root_object_properties()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_std_lib_globals_are_installed() {
        let engine = JavascriptEngine::new();
        let names: Vec<String> = engine
            .root_object_properties()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        for expected in ["Math", "String", "Array", "Object", "Number", "Boolean", "console", "eval", "NaN"] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }
}

// ============================================================================
// Calling into scripts
// ============================================================================

mod call_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_call_function_by_name() {
        let mut engine = JavascriptEngine::new();
        engine.execute("function add(a, b) { return a + b; }").unwrap();
        assert_eq!(
            engine
                .call_function("add", vec![JsValue::integer(2), JsValue::integer(3)])
                .unwrap(),
            JsValue::integer(5)
        );
        assert_eq!(
            engine
                .call_function("add", vec![string("a"), string("b")])
                .unwrap(),
            string("ab")
        );
    }

    #[test]
    fn test_call_function_this_is_the_global_object() {
        let mut engine = JavascriptEngine::new();
        engine
            .execute("var label = 'root'; function myLabel() { return this.label; }")
            .unwrap();
        assert_eq!(engine.call_function("myLabel", vec![]).unwrap(), string("root"));
    }

    #[test]
    fn test_call_function_on_non_function_global() {
        let mut engine = JavascriptEngine::new();
        engine.execute("var notFn = 1;").unwrap();
        let err = engine.call_function("notFn", vec![]).unwrap_err();
        assert_eq!(
            err.kind,
            JErrorType::TypeError("Unknown function 'notFn'".to_string())
        );
    }

    #[test]
    fn test_call_native_function_by_name() {
        let mut engine = JavascriptEngine::new();
        assert_eq!(
            engine.call_function("parseInt", vec![string("77")]).unwrap(),
            JsValue::integer(77)
        );
    }

    #[test]
    fn test_call_function_object_with_scope_object() {
        let mut engine = JavascriptEngine::new();
        engine
            .execute(
                "function greet(greeting) { return greeting + ', ' + this.name; }
                 function bare() { return name; }",
            )
            .unwrap();
        let greet = engine.evaluate("greet").unwrap();
        let bare = engine.evaluate("bare").unwrap();

        let mut person = JsObject::new();
        person.set_property("name", string("Ada"));
        let person = person.into_shared();

        assert_eq!(
            engine
                .call_function_object(&person, &greet, vec![string("Hello")])
                .unwrap(),
            string("Hello, Ada")
        );
        // Free names resolve through the scope object too.
        assert_eq!(
            engine.call_function_object(&person, &bare, vec![]).unwrap(),
            string("Ada")
        );
    }

    #[test]
    fn test_call_function_object_with_non_function() {
        let mut engine = JavascriptEngine::new();
        let scope = JsObject::new().into_shared();
        let err = engine
            .call_function_object(&scope, &JsValue::integer(1), vec![])
            .unwrap_err();
        assert_eq!(err.message(), "This expression is not a function!");
    }
}

// ============================================================================
// Configuration
// ============================================================================

mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_engine_from_parsed_config() {
        let config = EngineConfig::parse(
            "[engine]\nmaximum_execution_time_ms = 1500\nmax_call_depth = 8\n",
        )
        .unwrap();
        let mut engine = JavascriptEngine::with_config(config);
        assert_eq!(engine.maximum_execution_time(), Duration::from_millis(1500));

        engine.execute("function deep(n) { return n == 0 ? 0 : deep(n - 1); }").unwrap();
        assert_eq!(engine.evaluate("deep(5)").unwrap(), JsValue::integer(0));
        let err = engine.evaluate("deep(20)").unwrap_err();
        assert!(matches!(err.kind, JErrorType::RangeError(_)));
    }

    #[test]
    fn test_engine_without_std_lib() {
        let mut engine = JavascriptEngine::with_config(EngineConfig::new().with_std_lib(false));
        assert_eq!(engine.evaluate("typeof Math").unwrap(), string("undefined"));
        assert_eq!(engine.evaluate("1 + 1").unwrap(), JsValue::integer(2));
    }
}
