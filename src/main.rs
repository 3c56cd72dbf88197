//! Recorrido de validación sobre la configuración por defecto del pipeline.

use moebius_core::{CoreBuildError, Key, MoebiusBuilder, Value};
use serde_json::json;

fn main() {
    if let Err(e) = run_default_validation() {
        eprintln!("[moebius-demo] error: {e}");
        std::process::exit(1);
    }
}

fn run_default_validation() -> Result<(), CoreBuildError> {
    let builder = MoebiusBuilder::with_defaults();
    let value = builder.build()?;
    let node = value.as_node()
                    .cloned()
                    .ok_or_else(|| CoreBuildError::Internal("default build did not produce a node".into()))?;

    // Lecturas perezosas memoizadas por clave
    let first = node.get(&Key::data("api"))?;
    let second = node.get(&Key::data("api"))?;
    println!("memoized read .......... {}", first == second);

    // La escritura pisa la rama perezosa
    node.set(Key::data("port"), Value::Data(json!(8080)));
    println!("override read .......... {}", node.get(&Key::data("port"))?);

    // Invocación memoizada (los argumentos no importan)
    let call_a = node.call(&[])?;
    let call_b = node.call(&[Value::Data(json!("ignored"))])?;
    println!("memoized call .......... {}", call_a == call_b);

    // Coerciones fijas
    println!("as text ................ {}", node);
    println!("as number .............. {:?}", node.to_number());

    // Claves limpiadas por el finalizador
    println!("thenable ............... {}", !node.get(&Key::data("then"))?.is_null());
    println!("has call history ....... {}", !node.get(&Key::data("calls"))?.is_null());

    // Traza de eventos (builds anidados incluidos)
    println!("trail .................. {}", builder.event_variants().join(""));

    Ok(())
}
