//! XML grammar parser.
//!
//! Parses `<rules>` documents into the [`RuleSet`] model.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

use crate::error::{GrammarError, Result};
use crate::types::{Call, Instance, Rule, RuleSet};

/// Parse a grammar document from a string.
///
/// The expected shape:
///
/// ```xml
/// <rules max_depth="30">
///     <rule name="entry">
///         <call count="14" transforms="rz 5" rule="hbox"/>
///     </rule>
///     <rule name="hbox">
///         <instance transforms="s 0.55 2.0 1.25" shape="curve"/>
///     </rule>
/// </rules>
/// ```
///
/// Rule declaration order is preserved; rules sharing a name become weighted
/// variants. Unknown elements are skipped.
///
/// # Errors
///
/// Returns an error if the XML is malformed, the `<rules>` root or a
/// required attribute is missing, or a numeric attribute fails to parse.
/// No partially-loaded grammar is ever returned.
pub fn parse_rules_str(xml: &str) -> Result<RuleSet> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    parse_rules_reader(&mut reader)
}

/// Parse a grammar from a reader.
fn parse_rules_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<RuleSet> {
    let mut buf = Vec::new();
    let mut ruleset: Option<RuleSet> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"rules" => {
                ruleset = Some(parse_ruleset(reader, e)?);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(GrammarError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    ruleset.ok_or_else(|| GrammarError::missing_element("rules", "grammar document"))
}

/// Parse the `rules` root element and its children.
fn parse_ruleset<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<RuleSet> {
    let max_depth = parse_u32_attr(start, "max_depth", "rules")?
        .ok_or_else(|| GrammarError::missing_attribute("max_depth", "rules"))?;

    let mut ruleset = RuleSet {
        max_depth,
        rules: Vec::new(),
    };
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == b"rule" {
                    ruleset.rules.push(parse_rule(reader, e)?);
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"rule" {
                    ruleset.rules.push(parse_rule_attrs(e)?);
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"rules" => break,
            Ok(Event::Eof) => return Err(GrammarError::XmlParse("unexpected EOF in rules".into())),
            Ok(_) => {}
            Err(e) => return Err(GrammarError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(ruleset)
}

/// Parse a `rule` element and its children.
fn parse_rule<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Rule> {
    let mut rule = parse_rule_attrs(start)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"call" => {
                        rule.calls.push(parse_call(reader, e)?);
                    }
                    b"instance" => {
                        rule.instances.push(parse_instance(reader, e)?);
                    }
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"call" => {
                    rule.calls.push(parse_call_attrs(e)?);
                }
                b"instance" => {
                    rule.instances.push(parse_instance_attrs(e)?);
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"rule" => break,
            Ok(Event::Eof) => return Err(GrammarError::XmlParse("unexpected EOF in rule".into())),
            Ok(_) => {}
            Err(e) => return Err(GrammarError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(rule)
}

/// Parse rule attributes only.
fn parse_rule_attrs(e: &BytesStart) -> Result<Rule> {
    let name =
        get_attribute_opt(e, "name").ok_or_else(|| GrammarError::missing_attribute("name", "rule"))?;

    let element = format!("rule '{name}'");
    let max_depth = parse_u32_attr(e, "max_depth", &element)?;
    let weight = parse_u32_attr(e, "weight", &element)?.unwrap_or(0);
    let successor = get_attribute_opt(e, "successor").filter(|s| !s.is_empty());

    Ok(Rule {
        name,
        calls: Vec::new(),
        instances: Vec::new(),
        max_depth,
        successor,
        weight,
    })
}

/// Parse a `call` element (calls carry no meaningful children).
fn parse_call<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Call> {
    let call = parse_call_attrs(start)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::End(ref e)) if e.name().as_ref() == b"call" => break,
            Ok(Event::Eof) => return Err(GrammarError::XmlParse("unexpected EOF in call".into())),
            Ok(_) => {}
            Err(e) => return Err(GrammarError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(call)
}

/// Parse call attributes only.
fn parse_call_attrs(e: &BytesStart) -> Result<Call> {
    let rule =
        get_attribute_opt(e, "rule").ok_or_else(|| GrammarError::missing_attribute("rule", "call"))?;
    let transforms = get_attribute_opt(e, "transforms").unwrap_or_default();
    let count = parse_u32_attr(e, "count", "call")?.unwrap_or(0);

    Ok(Call {
        transforms,
        rule,
        count,
    })
}

/// Parse an `instance` element, accepting the geometry tag either as a
/// `shape` attribute or as a nested `<shape>` child's text.
fn parse_instance<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Instance> {
    let mut instance = parse_instance_attrs(start)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == b"shape" {
                    instance.shape = read_element_text(reader, b"shape")?;
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"instance" => break,
            Ok(Event::Eof) => {
                return Err(GrammarError::XmlParse("unexpected EOF in instance".into()))
            }
            Ok(_) => {}
            Err(e) => return Err(GrammarError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(instance)
}

/// Parse instance attributes only.
fn parse_instance_attrs(e: &BytesStart) -> Result<Instance> {
    let transforms = get_attribute_opt(e, "transforms").unwrap_or_default();
    let shape = get_attribute_opt(e, "shape").unwrap_or_default();

    Ok(Instance { transforms, shape })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get an optional attribute value.
fn get_attribute_opt(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec()).ok();
        }
    }
    None
}

/// Parse an optional unsigned attribute, erroring on a malformed value.
fn parse_u32_attr(e: &BytesStart, name: &'static str, element: &str) -> Result<Option<u32>> {
    match get_attribute_opt(e, name) {
        None => Ok(None),
        Some(raw) => raw.parse::<u32>().map(Some).map_err(|_| {
            GrammarError::invalid_attribute(name, element, format!("not an unsigned integer: {raw}"))
        }),
    }
}

/// Collect the text content of the current element up to its end tag.
fn read_element_text<R: BufRead>(reader: &mut Reader<R>, name: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| GrammarError::XmlParse(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == name => break,
            Ok(Event::Eof) => {
                return Err(GrammarError::XmlParse("unexpected EOF in element text".into()))
            }
            Ok(_) => {}
            Err(e) => return Err(GrammarError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(text)
}

/// Skip an element and all its children.
fn skip_element<R: BufRead>(reader: &mut Reader<R>, name: &[u8]) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == name => {
                depth += 1;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == name => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(GrammarError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}
