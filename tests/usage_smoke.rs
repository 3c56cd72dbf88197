use moebius_core::{create, Key, Value};
use serde_json::json;

#[test]
fn end_to_end_default_usage() {
    let value = create().expect("default build");
    let node = value.as_node().cloned().expect("node");

    // reads memoize per key
    let a = node.get(&Key::data("a")).expect("read");
    assert_eq!(a, node.get(&Key::data("a")).expect("read again"));

    // writes win over lazy reads
    node.set(Key::data("b"), Value::Data(json!("x")));
    let read = node.get(&Key::data("b")).expect("read b");
    assert_eq!(read.as_data(), Some(&json!("x")));

    // calls cache a single self-similar result
    assert_eq!(node.call(&[]).expect("call"), node.call(&[]).expect("call again"));

    // coercions are fixed
    assert_eq!(format!("{}", node), "[whatever Moebius]");
    assert_eq!(node.to_number(), Some(42.0));
}
