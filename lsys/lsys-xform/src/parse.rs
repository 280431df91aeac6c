//! Parser for the whitespace-token transform mini-language.

use std::str::SplitWhitespace;

use tracing::warn;

use crate::transform::Xform;

/// Parse a transform string into a single composed [`Xform`].
///
/// Examples of the mini-language:
///
/// ```text
/// rx -2 tx 0.1 sa 0.996
/// s 0.55 2.0 1.25
/// ```
///
/// Opcodes compose left to right: each new elementary transform applies
/// *after* the transforms already accumulated. The empty string yields the
/// identity and is not an error. An unrecognized opcode or a malformed
/// operand is reported as a warning and contributes nothing; the rest of
/// the string keeps parsing.
#[must_use]
pub fn parse_xform(s: &str) -> Xform {
    let mut acc = Xform::identity();
    let mut tokens = s.split_whitespace();

    while let Some(op) = tokens.next() {
        let elem = match op {
            "s" => operands::<3>(&mut tokens, op).map(|[x, y, z]| Xform::scale(x, y, z)),
            "sa" => operands::<1>(&mut tokens, op).map(|[a]| Xform::uniform_scale(a)),
            "t" => operands::<3>(&mut tokens, op).map(|[x, y, z]| Xform::translation(x, y, z)),
            "tx" => operands::<1>(&mut tokens, op).map(|[x]| Xform::translation(x, 0.0, 0.0)),
            "ty" => operands::<1>(&mut tokens, op).map(|[y]| Xform::translation(0.0, y, 0.0)),
            "tz" => operands::<1>(&mut tokens, op).map(|[z]| Xform::translation(0.0, 0.0, z)),
            "rx" => operands::<1>(&mut tokens, op).map(|[a]| Xform::rotation_x(a.to_radians())),
            "ry" => operands::<1>(&mut tokens, op).map(|[a]| Xform::rotation_y(a.to_radians())),
            "rz" => operands::<1>(&mut tokens, op).map(|[a]| Xform::rotation_z(a.to_radians())),
            unknown => {
                warn!("unknown transform opcode '{unknown}', skipping");
                None
            }
        };

        if let Some(elem) = elem {
            acc = acc.then(&elem);
        }
    }

    acc
}

/// Pull `N` float operands for `op`, warning and bailing on shortfall.
fn operands<const N: usize>(tokens: &mut SplitWhitespace, op: &str) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    for slot in &mut out {
        let Some(token) = tokens.next() else {
            warn!("missing operand for transform opcode '{op}'");
            return None;
        };
        match token.parse::<f64>() {
            Ok(value) => *slot = value,
            Err(_) => {
                warn!("malformed operand '{token}' for transform opcode '{op}'");
                return None;
            }
        }
    }
    Some(out)
}
