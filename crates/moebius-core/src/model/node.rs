//! Nodo construido: el valor "stand-in" que responde a cualquier acceso.
//!
//! Un `Node` es un handle compartido (`Rc`) sobre estado interior mutable:
//! - `slots`: registro de memoización clave → valor (orden de inserción),
//!   que también almacena las escrituras explícitas del test.
//! - `call_slot`: cache de una sola celda para "invocar el valor devuelve
//!   siempre el mismo resultado".
//! - `rebuild`: handle al pipeline completo; cada miss de una clave de datos
//!   lo ejecuta y memoiza el resultado bajo esa clave.
//!
//! La estructura conceptual es un árbol infinito auto-similar; la memoización
//! por clave garantiza que cada rama se compute a lo sumo una vez por nodo.
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::errors::CoreBuildError;
use crate::stage::Rebuild;

use super::{Key, Value};

#[derive(Clone)]
pub struct Node {
    cell: Rc<NodeCell>,
}

struct NodeCell {
    slots: RefCell<IndexMap<Key, Value>>,
    call_slot: RefCell<Option<Value>>,
    rebuild: RefCell<Option<Rebuild>>,
    callable: Cell<bool>,
    lazy: Cell<bool>,
    display_hint: RefCell<Option<String>>,
    numeric_hint: Cell<Option<f64>>,
}

impl Node {
    /// Nodo invocable producido por la etapa inicial del pipeline.
    pub(crate) fn new_callable(rebuild: Rebuild) -> Self {
        let node = Self::bare();
        node.cell.callable.set(true);
        *node.cell.rebuild.borrow_mut() = Some(rebuild);
        node
    }

    /// Activa la intercepción perezosa de lecturas (etapa decoradora).
    pub(crate) fn enable_intercept(&self, rebuild: Rebuild) {
        self.cell.lazy.set(true);
        *self.cell.rebuild.borrow_mut() = Some(rebuild);
    }

    pub(crate) fn set_display_hint(&self, text: String) {
        *self.cell.display_hint.borrow_mut() = Some(text);
    }

    pub(crate) fn set_numeric_hint(&self, numeric: f64) {
        self.cell.numeric_hint.set(Some(numeric));
    }

    fn bare() -> Self {
        Self { cell: Rc::new(NodeCell { slots: RefCell::new(IndexMap::new()),
                                        call_slot: RefCell::new(None),
                                        rebuild: RefCell::new(None),
                                        callable: Cell::new(false),
                                        lazy: Cell::new(false),
                                        display_hint: RefCell::new(None),
                                        numeric_hint: Cell::new(None) }) }
    }

    /// Lectura de una clave.
    ///
    /// - Clave ya almacenada: devuelve el valor tal cual (escrituras del test
    ///   incluidas).
    /// - Clave `Data` ausente en un nodo interceptado: ejecuta el pipeline
    ///   completo, memoiza el resultado bajo la clave y lo devuelve.
    /// - Clave `Meta`: nunca dispara un build ni muta el registro.
    ///
    /// Un fallo del build anidado se propaga sin recuperación local.
    pub fn get(&self, key: &Key) -> Result<Value, CoreBuildError> {
        if let Some(stored) = self.cell.slots.borrow().get(key) {
            return Ok(stored.clone());
        }
        if key.is_meta() || !self.cell.lazy.get() {
            return Ok(Value::Null);
        }
        let rebuild = self.cell.rebuild.borrow().clone();
        match rebuild {
            Some(run) => {
                // no retener el borrow de slots durante el build anidado
                let value = run()?;
                self.cell.slots
                    .borrow_mut()
                    .insert(key.clone(), value.clone());
                Ok(value)
            }
            None => Ok(Value::Null),
        }
    }

    /// Escritura incondicional; nunca falla. Lecturas posteriores de la clave
    /// devuelven el valor escrito en lugar de disparar un build.
    pub fn set(&self, key: Key, value: Value) {
        self.cell.slots.borrow_mut().insert(key, value);
    }

    /// Invocación del valor. La primera llamada ejecuta el pipeline completo
    /// y cachea el resultado; toda llamada posterior devuelve exactamente el
    /// valor cacheado, ignorando los argumentos.
    pub fn call(&self, _args: &[Value]) -> Result<Value, CoreBuildError> {
        if !self.cell.callable.get() {
            return Err(CoreBuildError::NotCallable);
        }
        if let Some(cached) = self.cell.call_slot.borrow().as_ref() {
            return Ok(cached.clone());
        }
        let rebuild = self.cell.rebuild
                          .borrow()
                          .clone()
                          .ok_or_else(|| CoreBuildError::Internal("callable node without rebuild handle".into()))?;
        let value = rebuild()?;
        *self.cell.call_slot.borrow_mut() = Some(value.clone());
        Ok(value)
    }

    /// Forma numérica fijada por el finalizador, si existe.
    pub fn to_number(&self) -> Option<f64> {
        self.cell.numeric_hint.get()
    }

    pub fn is_callable(&self) -> bool {
        self.cell.callable.get()
    }

    pub fn is_intercepted(&self) -> bool {
        self.cell.lazy.get()
    }

    /// Claves presentes en el registro, en orden de primera aparición.
    pub fn keys(&self) -> Vec<Key> {
        self.cell.slots.borrow().keys().cloned().collect()
    }

    /// Identidad de handle (el análogo de la igualdad por referencia).
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.display_hint.borrow().as_deref() {
            Some(text) => f.write_str(text),
            None => f.write_str("[node]"),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
         .field("slots", &self.cell.slots.borrow().len())
         .field("callable", &self.cell.callable.get())
         .field("intercepted", &self.cell.lazy.get())
         .finish()
    }
}
