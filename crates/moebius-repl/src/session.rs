//! Sesión del sandbox: un único valor construido ligado al nombre `m`.
//!
//! La gramática es el análogo mínimo del contexto de evaluación original:
//! cadenas de propiedades (`m.a.b`), invocaciones (`m.a()`), asignaciones de
//! literales JSON (`m.a.b = {"k": 1}`) y dos metacomandos (`:events`,
//! `:quit`). La evaluación es síncrona, con contrato evaluar-y-callback.

use moebius_core::{BuildEventKind, CoreBuildError, Key, MoebiusBuilder, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("parse error: {0}")] Parse(String),
    #[error(transparent)] Build(#[from] CoreBuildError),
}

/// Resultado de evaluar una línea.
pub enum Outcome {
    Print(String),
    Quit,
    Empty,
}

enum Segment {
    Prop(String),
    Call,
}

enum Command {
    Eval(Vec<Segment>),
    Assign(Vec<Segment>, String, serde_json::Value),
}

pub struct Session {
    builder: MoebiusBuilder,
    root: Value,
}

impl Session {
    pub fn new() -> Result<Self, ReplError> {
        let builder = MoebiusBuilder::with_defaults();
        let root = builder.build()?;
        Ok(Self { builder, root })
    }

    /// Evalúa el texto y llama a `done` exactamente una vez, con el error o
    /// con el resultado.
    pub fn eval_with<F>(&mut self, input: &str, done: F)
        where F: FnOnce(Result<Outcome, ReplError>)
    {
        done(self.eval(input));
    }

    fn eval(&mut self, input: &str) -> Result<Outcome, ReplError> {
        let line = input.trim();
        if line.is_empty() {
            return Ok(Outcome::Empty);
        }
        match line {
            ":quit" | ":q" => return Ok(Outcome::Quit),
            ":events" => return Ok(Outcome::Print(self.render_events())),
            _ => {}
        }

        match parse(line)? {
            Command::Eval(path) => {
                let value = self.resolve(&path)?;
                Ok(Outcome::Print(value.to_string()))
            }
            Command::Assign(prefix, name, json) => {
                let target = self.resolve(&prefix)?;
                let node = target.as_node()
                                 .ok_or_else(|| ReplError::Parse(format!("cannot assign '{}' on a {} value",
                                                                         name,
                                                                         target.kind_name())))?;
                node.set(Key::data(name.clone()), Value::Data(json.clone()));
                Ok(Outcome::Print(json.to_string()))
            }
        }
    }

    fn resolve(&self, path: &[Segment]) -> Result<Value, ReplError> {
        let mut current = self.root.clone();
        for segment in path {
            let node = current.as_node()
                              .cloned()
                              .ok_or_else(|| ReplError::Parse(format!("cannot traverse a {} value",
                                                                      current.kind_name())))?;
            current = match segment {
                Segment::Prop(name) => node.get(&Key::data(name.as_str()))?,
                Segment::Call => node.call(&[])?,
            };
        }
        Ok(current)
    }

    fn render_events(&self) -> String {
        let events = self.builder.events();
        if events.is_empty() {
            return "no builds recorded".to_string();
        }
        let lines: Vec<String> = events.iter()
                                       .map(|e| {
                                           let build = e.build_id.to_string();
                                           format!("{:>4}  {}  {}", e.seq, &build[..8], describe(&e.kind))
                                       })
                                       .collect();
        lines.join("\n")
    }
}

fn describe(kind: &BuildEventKind) -> String {
    match kind {
        BuildEventKind::BuildStarted { stage_count, .. } => format!("build started ({} stages)", stage_count),
        BuildEventKind::StageApplied { stage_id, .. } => format!("stage applied: {}", stage_id),
        BuildEventKind::StageFailed { stage_id, error, .. } => format!("stage failed: {} ({})", stage_id, error),
        BuildEventKind::BuildCompleted { .. } => "build completed".to_string(),
    }
}

fn parse(line: &str) -> Result<Command, ReplError> {
    let (path, rest) = parse_path(line)?;
    let rest = rest.trim_start();
    if rest.is_empty() {
        return Ok(Command::Eval(path));
    }
    let json_text = rest.strip_prefix('=')
                        .ok_or_else(|| ReplError::Parse(format!("unexpected trailing input: '{}'", rest)))?;
    let json: serde_json::Value = serde_json::from_str(json_text.trim())
        .map_err(|e| ReplError::Parse(format!("invalid JSON literal: {}", e)))?;

    let mut path = path;
    match path.pop() {
        Some(Segment::Prop(name)) => Ok(Command::Assign(path, name, json)),
        _ => Err(ReplError::Parse("assignment target must be a property".into())),
    }
}

fn parse_path(line: &str) -> Result<(Vec<Segment>, &str), ReplError> {
    let mut rest = line;
    let (root, after) = take_ident(rest).ok_or_else(|| ReplError::Parse("expected `m`".into()))?;
    if root != "m" {
        return Err(ReplError::Parse(format!("unknown name '{}' (only `m` is bound)", root)));
    }
    rest = after;

    let mut segments = Vec::new();
    loop {
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (name, after) = take_ident(after_dot)
                .ok_or_else(|| ReplError::Parse("expected a property name after '.'".into()))?;
            segments.push(Segment::Prop(name.to_string()));
            rest = after;
        } else if let Some(after_paren) = rest.strip_prefix('(') {
            let after = after_paren.trim_start();
            rest = after.strip_prefix(')')
                        .ok_or_else(|| ReplError::Parse("expected ')' (arguments are ignored anyway)".into()))?;
            segments.push(Segment::Call);
        } else {
            break;
        }
    }
    Ok((segments, rest))
}

fn take_ident(input: &str) -> Option<(&str, &str)> {
    let mut end = 0;
    for (idx, ch) in input.char_indices() {
        let valid = if idx == 0 { ch.is_alphabetic() || ch == '_' } else { ch.is_alphanumeric() || ch == '_' };
        if !valid {
            break;
        }
        end = idx + ch.len_utf8();
    }
    if end == 0 {
        None
    } else {
        Some((&input[..end], &input[end..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moebius_core::constants::SENTINEL_TEXT;

    fn eval(session: &mut Session, line: &str) -> Result<Outcome, ReplError> {
        let mut slot = None;
        session.eval_with(line, |res| slot = Some(res));
        slot.expect("callback runs exactly once")
    }

    fn printed(session: &mut Session, line: &str) -> String {
        match eval(session, line) {
            Ok(Outcome::Print(text)) => text,
            Ok(_) => panic!("expected printable outcome for '{}'", line),
            Err(e) => panic!("eval failed for '{}': {}", line, e),
        }
    }

    #[test]
    fn any_property_chain_prints_the_sentinel() {
        let mut session = Session::new().expect("session");
        assert_eq!(printed(&mut session, "m.totally.unknown.path"), SENTINEL_TEXT);
    }

    #[test]
    fn assignment_overrides_the_lazy_read() {
        let mut session = Session::new().expect("session");
        let _ = printed(&mut session, "m.x = 7");
        assert_eq!(printed(&mut session, "m.x"), "7");
    }

    #[test]
    fn calls_resolve_through_the_chain() {
        let mut session = Session::new().expect("session");
        assert_eq!(printed(&mut session, "m.service().status"), SENTINEL_TEXT);
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let mut session = Session::new().expect("session");
        let first = printed(&mut session, "m.config.port");
        let second = printed(&mut session, "m.config.port");
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_root_is_a_parse_error() {
        let mut session = Session::new().expect("session");
        match eval(&mut session, "x.y") {
            Err(ReplError::Parse(_)) => {}
            _ => panic!("only `m` is bound in the sandbox"),
        }
    }

    #[test]
    fn quit_is_reported_as_outcome() {
        let mut session = Session::new().expect("session");
        assert!(matches!(eval(&mut session, ":quit"), Ok(Outcome::Quit)));
    }
}
