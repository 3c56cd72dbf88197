use std::cell::{Cell, RefCell};
use std::rc::Rc;

use moebius_core::{CallRecorder, Key, MoebiusBuilder, Value};
use serde_json::json;

/// Doble de la utilidad externa: cuenta los wraps y anota lo que observa
/// del valor crudo que recibe.
#[derive(Default)]
struct ProbeRecorder {
    wraps: Cell<u32>,
    saw_intercepted: RefCell<Vec<bool>>,
}

impl CallRecorder for ProbeRecorder {
    fn wrap(&self, value: Value) -> Value {
        self.wraps.set(self.wraps.get() + 1);
        if let Value::Node(node) = &value {
            self.saw_intercepted.borrow_mut().push(node.is_intercepted());
            // una utilidad real dejaría aquí su historial de invocaciones
            node.set(Key::data("calls"), Value::Data(json!([])));
        }
        value
    }
}

#[test]
fn recorder_stage_sits_between_producer_and_intercept() {
    let builder = MoebiusBuilder::with_defaults();
    builder.install_call_recorder(Rc::new(ProbeRecorder::default()));
    assert_eq!(builder.stage_ids(), vec!["self_callable", "recorder", "intercept", "finalize"]);
}

#[test]
fn wrap_receives_the_raw_callable() {
    let recorder = Rc::new(ProbeRecorder::default());
    let builder = MoebiusBuilder::with_defaults();
    builder.install_call_recorder(recorder.clone());

    builder.build().expect("build");
    assert_eq!(recorder.wraps.get(), 1);
    assert_eq!(recorder.saw_intercepted.borrow().as_slice(), &[false],
               "the wrap runs before the interception stage");
}

#[test]
fn finalizer_clears_whatever_history_the_wrap_left() {
    let builder = MoebiusBuilder::with_defaults();
    builder.install_call_recorder(Rc::new(ProbeRecorder::default()));

    let node = builder.build().expect("build").as_node().cloned().expect("node");
    assert!(node.get(&Key::data("calls")).expect("calls").is_null());
}

#[test]
fn every_build_wraps_again() {
    let recorder = Rc::new(ProbeRecorder::default());
    let builder = MoebiusBuilder::with_defaults();
    builder.install_call_recorder(recorder.clone());

    let node = builder.build().expect("build").as_node().cloned().expect("node");
    builder.build().expect("second build");
    assert_eq!(recorder.wraps.get(), 2);

    // los builds perezosos también pasan por el wrap
    let _ = node.get(&Key::data("branch")).expect("lazy read");
    assert_eq!(recorder.wraps.get(), 3);
}

#[test]
fn defaults_alone_never_install_the_recorder() {
    let builder = MoebiusBuilder::with_defaults();
    assert_eq!(builder.stage_ids(), vec!["self_callable", "intercept", "finalize"]);
}
