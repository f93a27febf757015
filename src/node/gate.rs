//! Gate types and their evaluation table.
//!
//! Each [`GateType`] maps to a pure function `fn(&[bool]) -> bool`. The
//! table is closed: adding a gate means adding a variant, its arity and
//! its function here, and nowhere else.

use std::str::FromStr;

use crate::error::{BuildError, BuildResult};

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum GateType {
    /// Primary input; driven only by stimuli.
    In,
    /// Primary output; mirrors its single input.
    Out,
    Buf,
    /// Named net between gates; mirrors its single input.
    Wire,
    Not,
    And,
    Or,
    Nand,
    Nor,
    Xor,
}

/// How many inputs a gate accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Arity {
    /// No inputs at all (IN).
    None,
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Whether `count` inputs satisfy this arity.
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::None => count == 0,
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    /// Largest input count this arity allows, if bounded.
    #[inline]
    pub fn max(self) -> Option<usize> {
        match self {
            Arity::None => Some(0),
            Arity::Exactly(n) => Some(n),
            Arity::AtLeast(_) => None,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::None => write!(f, "no"),
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

type EvalFn = fn(&[bool]) -> bool;

fn identity(inputs: &[bool]) -> bool {
    inputs[0]
}

fn not(inputs: &[bool]) -> bool {
    !inputs[0]
}

fn and(inputs: &[bool]) -> bool {
    inputs.iter().all(|&v| v)
}

fn or(inputs: &[bool]) -> bool {
    inputs.iter().any(|&v| v)
}

fn nand(inputs: &[bool]) -> bool {
    !and(inputs)
}

fn nor(inputs: &[bool]) -> bool {
    !or(inputs)
}

fn xor(inputs: &[bool]) -> bool {
    inputs.iter().filter(|&&v| v).count() % 2 == 1
}

impl GateType {
    /// Every gate type, in declaration order.
    pub const ALL: [GateType; 10] = [
        GateType::In,
        GateType::Out,
        GateType::Buf,
        GateType::Wire,
        GateType::Not,
        GateType::And,
        GateType::Or,
        GateType::Nand,
        GateType::Nor,
        GateType::Xor,
    ];

    /// The input count this gate type accepts.
    pub fn arity(self) -> Arity {
        match self {
            GateType::In => Arity::None,
            GateType::Out | GateType::Buf | GateType::Wire | GateType::Not => Arity::Exactly(1),
            GateType::And | GateType::Or | GateType::Nand | GateType::Nor | GateType::Xor => {
                Arity::AtLeast(1)
            }
        }
    }

    fn eval_fn(self) -> Option<EvalFn> {
        match self {
            GateType::In => None,
            GateType::Out | GateType::Buf | GateType::Wire => Some(identity),
            GateType::Not => Some(not),
            GateType::And => Some(and),
            GateType::Or => Some(or),
            GateType::Nand => Some(nand),
            GateType::Nor => Some(nor),
            GateType::Xor => Some(xor),
        }
    }

    /// Compute this gate's output for the given input values.
    ///
    /// Fails with [`BuildError::Arity`] when `inputs` does not satisfy the
    /// gate's arity, and with [`BuildError::NotEvaluable`] for IN.
    pub fn evaluate(self, inputs: &[bool]) -> BuildResult<bool> {
        let f = self
            .eval_fn()
            .ok_or(BuildError::NotEvaluable { gate: self })?;
        let expected = self.arity();
        if !expected.accepts(inputs.len()) {
            return Err(BuildError::Arity {
                node: None,
                gate: self,
                expected,
                found: inputs.len(),
            });
        }
        Ok(f(inputs))
    }

    /// The canonical upper-case token.
    pub fn as_str(self) -> &'static str {
        match self {
            GateType::In => "IN",
            GateType::Out => "OUT",
            GateType::Buf => "BUF",
            GateType::Wire => "WIRE",
            GateType::Not => "NOT",
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Nand => "NAND",
            GateType::Nor => "NOR",
            GateType::Xor => "XOR",
        }
    }
}

impl FromStr for GateType {
    type Err = BuildError;

    /// Accepts the canonical tokens and the netlist declaration keywords
    /// `input`, `output` and `wire`, case-insensitively.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let gate = match token.trim().to_ascii_uppercase().as_str() {
            "IN" | "INPUT" => GateType::In,
            "OUT" | "OUTPUT" => GateType::Out,
            "BUF" => GateType::Buf,
            "WIRE" => GateType::Wire,
            "NOT" => GateType::Not,
            "AND" => GateType::And,
            "OR" => GateType::Or,
            "NAND" => GateType::Nand,
            "NOR" => GateType::Nor,
            "XOR" => GateType::Xor,
            _ => return Err(BuildError::UnknownGateType(token.to_string())),
        };
        Ok(gate)
    }
}

impl std::fmt::Display for GateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_or_truth_tables() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            assert_eq!(GateType::And.evaluate(&[a, b]).unwrap(), a && b);
            assert_eq!(GateType::Or.evaluate(&[a, b]).unwrap(), a || b);
            assert_eq!(GateType::Nand.evaluate(&[a, b]).unwrap(), !(a && b));
            assert_eq!(GateType::Nor.evaluate(&[a, b]).unwrap(), !(a || b));
        }
    }

    #[test]
    fn test_xor_counts_odd_inputs() {
        assert!(!GateType::Xor.evaluate(&[true, true]).unwrap());
        assert!(GateType::Xor.evaluate(&[true, false]).unwrap());
        assert!(GateType::Xor.evaluate(&[true, true, true]).unwrap());
        assert!(!GateType::Xor.evaluate(&[true, true, true, true]).unwrap());
    }

    #[test]
    fn test_single_input_gates() {
        for gate in [GateType::Out, GateType::Buf, GateType::Wire] {
            assert!(gate.evaluate(&[true]).unwrap());
            assert!(!gate.evaluate(&[false]).unwrap());
        }
        assert!(!GateType::Not.evaluate(&[true]).unwrap());
        assert!(GateType::Not.evaluate(&[false]).unwrap());
    }

    #[test]
    fn test_variadic_gates_accept_one_input() {
        assert!(GateType::And.evaluate(&[true]).unwrap());
        assert!(!GateType::Nor.evaluate(&[true]).unwrap());
    }

    #[test]
    fn test_arity_errors() {
        let err = GateType::Not.evaluate(&[true, false]).unwrap_err();
        assert_eq!(
            err,
            BuildError::Arity {
                node: None,
                gate: GateType::Not,
                expected: Arity::Exactly(1),
                found: 2,
            }
        );
        assert!(matches!(
            GateType::Buf.evaluate(&[]),
            Err(BuildError::Arity { found: 0, .. })
        ));
        assert!(matches!(
            GateType::Xor.evaluate(&[]),
            Err(BuildError::Arity { .. })
        ));
    }

    #[test]
    fn test_input_is_not_evaluable() {
        assert_eq!(
            GateType::In.evaluate(&[]),
            Err(BuildError::NotEvaluable { gate: GateType::In })
        );
    }

    #[test]
    fn test_parse_tokens() {
        for gate in GateType::ALL {
            assert_eq!(gate.as_str().parse::<GateType>().unwrap(), gate);
        }
        assert_eq!("input".parse::<GateType>().unwrap(), GateType::In);
        assert_eq!("output".parse::<GateType>().unwrap(), GateType::Out);
        assert_eq!(" nand ".parse::<GateType>().unwrap(), GateType::Nand);
        assert_eq!(
            "MUX".parse::<GateType>(),
            Err(BuildError::UnknownGateType("MUX".into()))
        );
    }

    #[test]
    fn test_arity_bounds() {
        assert_eq!(GateType::In.arity().max(), Some(0));
        assert_eq!(GateType::Not.arity().max(), Some(1));
        assert_eq!(GateType::Or.arity().max(), None);
        assert!(GateType::Or.arity().accepts(5));
        assert!(!GateType::Or.arity().accepts(0));
    }
}
