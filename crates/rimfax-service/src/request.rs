//! Payload parsing.
//!
//! A request payload is newline-delimited JSON: one object per template,
//! intermediate lines defining custom gates, the last line the circuit.
//! Each template object carries a `length` field and one record per qubit
//! under `q0`, `q1`, … (bare-index keys are accepted too). Qubit records hold
//! a `gates` timeline and an optional `state`; composer-side extras like
//! `color` or `alias` are ignored. Run options (`shots`, `backend`,
//! `endianness`, output flags) are read from the circuit line.

use serde_json::{Map, Value};
use tracing::debug;

use rimfax_compile::{QubitSpec, Template};
use rimfax_ir::Ket;

use crate::error::{ServiceError, ServiceResult};

const DEFAULT_SHOTS: u32 = 10_000;
const DEFAULT_BACKEND: &str = "statevector";

/// One parsed payload line: the compile template plus any run options the
/// line carried.
#[derive(Debug, Clone)]
pub struct ParsedLine {
    /// The circuit template.
    pub template: Template,
    shots: Option<u32>,
    backend: Option<String>,
    big_endian: Option<bool>,
    include_counts: Option<bool>,
    include_amps: Option<bool>,
    include_unitary: Option<bool>,
}

/// Resolved run options for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Shots for counts sampling.
    pub shots: u32,
    /// Backend name for execution.
    pub backend: String,
    /// Whether the response uses big-endian qubit ordering.
    pub big_endian: bool,
    /// Whether to produce measurement counts.
    pub include_counts: bool,
    /// Whether to produce the statevector outputs.
    pub include_amps: bool,
    /// Whether to produce the unitary outputs.
    pub include_unitary: bool,
}

impl ParsedLine {
    /// Resolve this line's options against the defaults.
    ///
    /// When no output flag is present at all, counts and amplitudes are
    /// produced, matching what the composer historically received.
    pub fn options(&self) -> RunOptions {
        let no_flags = self.include_counts.is_none()
            && self.include_amps.is_none()
            && self.include_unitary.is_none();
        RunOptions {
            shots: self.shots.unwrap_or(DEFAULT_SHOTS),
            backend: self
                .backend
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKEND.to_owned()),
            big_endian: self.big_endian.unwrap_or(false),
            include_counts: self.include_counts.unwrap_or(no_flags),
            include_amps: self.include_amps.unwrap_or(no_flags),
            include_unitary: self.include_unitary.unwrap_or(false),
        }
    }
}

/// Parse a full payload into its lines, skipping blank ones.
pub fn parse_payload(payload: &str) -> ServiceResult<Vec<ParsedLine>> {
    let lines: Vec<ParsedLine> = payload
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect::<ServiceResult<_>>()?;
    debug!(lines = lines.len(), "parsed payload");
    Ok(lines)
}

/// Parse one payload line.
pub fn parse_line(line: &str) -> ServiceResult<ParsedLine> {
    let value: Value = serde_json::from_str(line)?;
    let Value::Object(obj) = value else {
        return Err(ServiceError::Payload(
            "payload line must be a JSON object".to_owned(),
        ));
    };

    let length = obj
        .get("length")
        .and_then(Value::as_u64)
        .ok_or_else(|| ServiceError::Payload("missing or invalid 'length'".to_owned()))?
        as usize;

    let mut records: Vec<(usize, QubitSpec)> = Vec::new();
    for (key, value) in &obj {
        let Value::Object(record) = value else {
            continue;
        };
        if !record.contains_key("gates") {
            continue;
        }
        let index: usize = key
            .strip_prefix('q')
            .unwrap_or(key.as_str())
            .parse()
            .map_err(|_| ServiceError::Payload(format!("invalid qubit key '{key}'")))?;
        records.push((index, parse_qubit(key, record)?));
    }
    records.sort_by_key(|(index, _)| *index);
    for (slot, (index, _)) in records.iter().enumerate() {
        if *index != slot {
            return Err(ServiceError::Payload(format!(
                "qubit keys must cover 0..{} without gaps or duplicates; found index {index}",
                records.len()
            )));
        }
    }

    Ok(ParsedLine {
        template: Template {
            length,
            qubits: records.into_iter().map(|(_, spec)| spec).collect(),
        },
        shots: parse_shots(&obj)?,
        backend: obj
            .get("backend")
            .and_then(Value::as_str)
            .map(str::to_owned),
        big_endian: parse_endianness(&obj)?,
        include_counts: obj.get("includeCounts").and_then(Value::as_bool),
        include_amps: obj.get("includeAmps").and_then(Value::as_bool),
        include_unitary: obj.get("includeUnitary").and_then(Value::as_bool),
    })
}

fn parse_qubit(key: &str, record: &Map<String, Value>) -> ServiceResult<QubitSpec> {
    let gates = record
        .get("gates")
        .and_then(Value::as_array)
        .ok_or_else(|| ServiceError::Payload(format!("qubit '{key}' has no gates array")))?
        .iter()
        .map(|g| {
            g.as_str().map(str::to_owned).ok_or_else(|| {
                ServiceError::Payload(format!("qubit '{key}' has a non-string gate"))
            })
        })
        .collect::<ServiceResult<Vec<String>>>()?;

    let state = match record.get("state").and_then(Value::as_str) {
        Some(text) => Ket::parse(text)
            .ok_or_else(|| ServiceError::Payload(format!("unknown initial state '{text}'")))?,
        None => Ket::default(),
    };

    Ok(QubitSpec { state, gates })
}

fn parse_shots(obj: &Map<String, Value>) -> ServiceResult<Option<u32>> {
    match obj.get("shots") {
        None => Ok(None),
        Some(value) => {
            let shots = value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ServiceError::Payload("invalid 'shots'".to_owned()))?;
            Ok(Some(shots))
        }
    }
}

fn parse_endianness(obj: &Map<String, Value>) -> ServiceResult<Option<bool>> {
    if let Some(value) = obj.get("endianness") {
        let text = value
            .as_str()
            .ok_or_else(|| ServiceError::Payload("invalid 'endianness'".to_owned()))?;
        return match text.to_ascii_lowercase().as_str() {
            "big" => Ok(Some(true)),
            "little" => Ok(Some(false)),
            _ => Err(ServiceError::Payload(format!(
                "unknown endianness '{text}'"
            ))),
        };
    }
    // Legacy boolean form.
    match obj.get("bigEndian") {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| ServiceError::Payload("invalid 'bigEndian'".to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_line() {
        let line = r#"{"length":2,"q0":{"state":"|1>","gates":["x","h"]},"q1":{"gates":["inertia"],"color":"red"}}"#;
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.template.length, 2);
        assert_eq!(parsed.template.qubits.len(), 2);
        assert_eq!(parsed.template.qubits[0].state, Ket::One);
        assert_eq!(parsed.template.qubits[0].gates, vec!["x", "h"]);
        assert_eq!(parsed.template.qubits[1].state, Ket::Zero);
    }

    #[test]
    fn test_qubit_key_ordering() {
        let line = r#"{"length":3,"q2":{"gates":[]},"q1":{"gates":["x"]},"0":{"gates":["h"]}}"#;
        let parsed = parse_line(line).unwrap();
        assert_eq!(parsed.template.qubits[0].gates, vec!["h"]);
        assert_eq!(parsed.template.qubits[1].gates, vec!["x"]);
        assert!(parsed.template.qubits[2].gates.is_empty());
    }

    #[test]
    fn test_qubit_keys_must_be_contiguous() {
        // A gap must not silently reindex q5 as qubit 1.
        assert!(matches!(
            parse_line(r#"{"length":2,"q0":{"gates":[]},"q5":{"gates":[]}}"#),
            Err(ServiceError::Payload(_))
        ));
        // 'q1' and bare '1' name the same qubit twice.
        assert!(matches!(
            parse_line(r#"{"length":2,"q0":{"gates":[]},"q1":{"gates":[]},"1":{"gates":[]}}"#),
            Err(ServiceError::Payload(_))
        ));
    }

    #[test]
    fn test_options_defaults() {
        let parsed = parse_line(r#"{"length":1,"q0":{"gates":[]}}"#).unwrap();
        let options = parsed.options();
        assert_eq!(options.shots, 10_000);
        assert_eq!(options.backend, "statevector");
        assert!(!options.big_endian);
        assert!(options.include_counts);
        assert!(options.include_amps);
        assert!(!options.include_unitary);
    }

    #[test]
    fn test_explicit_flags_disable_the_defaults() {
        let parsed = parse_line(
            r#"{"length":1,"q0":{"gates":[]},"shots":50,"backend":"tensor","includeUnitary":true}"#,
        )
        .unwrap();
        let options = parsed.options();
        assert_eq!(options.shots, 50);
        assert_eq!(options.backend, "tensor");
        assert!(!options.include_counts);
        assert!(!options.include_amps);
        assert!(options.include_unitary);
    }

    #[test]
    fn test_endianness_forms() {
        let parsed =
            parse_line(r#"{"length":1,"q0":{"gates":[]},"endianness":"BIG"}"#).unwrap();
        assert!(parsed.options().big_endian);
        let parsed =
            parse_line(r#"{"length":1,"q0":{"gates":[]},"bigEndian":true}"#).unwrap();
        assert!(parsed.options().big_endian);
        assert!(parse_line(r#"{"length":1,"q0":{"gates":[]},"endianness":"middle"}"#).is_err());
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            parse_line(r#"{"q0":{"gates":[]}}"#),
            Err(ServiceError::Payload(_))
        ));
        assert!(matches!(
            parse_line(r#"{"length":1,"q0":{"gates":[1]}}"#),
            Err(ServiceError::Payload(_))
        ));
        assert!(matches!(
            parse_line(r#"{"length":1,"q0":{"state":"|7>","gates":[]}}"#),
            Err(ServiceError::Payload(_))
        ));
        assert!(matches!(
            parse_line("not json"),
            Err(ServiceError::Json(_))
        ));
    }

    #[test]
    fn test_parse_payload_skips_blank_lines() {
        let payload = "\n{\"length\":1,\"q0\":{\"gates\":[]}}\n\n";
        assert_eq!(parse_payload(payload).unwrap().len(), 1);
    }
}
