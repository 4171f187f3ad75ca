use crate::{Atom, Bindings, CompareOp, Engine, EngineError, Term, Trigger, Value};

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    /// Always yields a float.
    Div,
    /// Remainder with the sign of the divisor.
    Mod,
}

/// Procedures callable from rule bodies, looked up by symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Arith(ArithOp),
    Compare(CompareOp),
}

impl Primitive {
    /// Resolve a symbol against the fixed procedure table.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "+" => Primitive::Arith(ArithOp::Add),
            "-" => Primitive::Arith(ArithOp::Sub),
            "*" => Primitive::Arith(ArithOp::Mul),
            "/" => Primitive::Arith(ArithOp::Div),
            "mod" => Primitive::Arith(ArithOp::Mod),
            ">" => Primitive::Compare(CompareOp::Gt),
            "<" => Primitive::Compare(CompareOp::Lt),
            ">=" => Primitive::Compare(CompareOp::Gte),
            "<=" => Primitive::Compare(CompareOp::Lte),
            "=" | "eql" => Primitive::Compare(CompareOp::Eq),
            _ => return None,
        })
    }

    /// Apply the primitive to already-evaluated arguments. `name` is the
    /// symbol it was called through and only shows up in errors.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on wrong argument count, non-numeric operands,
    /// division by zero or integer overflow.
    pub fn apply(self, name: &str, args: &[Value]) -> Result<Value, EngineError> {
        let [a, b] = args else {
            return Err(EngineError::Arity {
                op: name.to_owned(),
                expected: 2,
                found: args.len(),
            });
        };
        match self {
            Primitive::Compare(op) => compare(name, op, a, b),
            Primitive::Arith(op) => {
                let (Some(x), Some(y)) = (a.as_number(), b.as_number()) else {
                    return Err(mismatch(name, a, b));
                };
                arithmetic(name, op, x, y).map(|atom| Value::Term(Term::Atom(atom)))
            }
        }
    }
}

fn mismatch(name: &str, a: &Value, b: &Value) -> EngineError {
    EngineError::TypeMismatch {
        op: name.to_owned(),
        args: format!("{a}, {b}"),
    }
}

fn compare(name: &str, op: CompareOp, a: &Value, b: &Value) -> Result<Value, EngineError> {
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return x
            .compare(op, y)
            .map(Value::Bool)
            .ok_or_else(|| mismatch(name, a, b));
    }
    match (op, a, b) {
        (CompareOp::Eq, _, _) => Ok(Value::Bool(a == b)),
        (_, Value::Term(Term::Atom(x)), Value::Term(Term::Atom(y))) => x
            .compare(op, y)
            .map(Value::Bool)
            .ok_or_else(|| mismatch(name, a, b)),
        _ => Err(mismatch(name, a, b)),
    }
}

#[allow(clippy::cast_precision_loss)]
fn arithmetic(name: &str, op: ArithOp, x: &Atom, y: &Atom) -> Result<Atom, EngineError> {
    let overflow = || EngineError::Overflow {
        op: name.to_owned(),
    };
    let div_zero = || EngineError::DivisionByZero {
        op: name.to_owned(),
    };

    if let (Atom::Int(x), Atom::Int(y)) = (x, y) {
        let (x, y) = (*x, *y);
        return match op {
            ArithOp::Add => x.checked_add(y).map(Atom::Int).ok_or_else(overflow),
            ArithOp::Sub => x.checked_sub(y).map(Atom::Int).ok_or_else(overflow),
            ArithOp::Mul => x.checked_mul(y).map(Atom::Int).ok_or_else(overflow),
            ArithOp::Div | ArithOp::Mod if y == 0 => Err(div_zero()),
            ArithOp::Div => Ok(Atom::Float(x as f64 / y as f64)),
            ArithOp::Mod => {
                let r = x.wrapping_rem(y);
                Ok(Atom::Int(if r != 0 && (r < 0) != (y < 0) { r + y } else { r }))
            }
        };
    }

    let (x, y) = (to_f64(x), to_f64(y));
    match op {
        ArithOp::Add => Ok(Atom::Float(x + y)),
        ArithOp::Sub => Ok(Atom::Float(x - y)),
        ArithOp::Mul => Ok(Atom::Float(x * y)),
        ArithOp::Div | ArithOp::Mod if y == 0.0 => Err(div_zero()),
        ArithOp::Div => Ok(Atom::Float(x / y)),
        ArithOp::Mod => {
            let r = x % y;
            Ok(Atom::Float(if r != 0.0 && (r < 0.0) != (y < 0.0) { r + y } else { r }))
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(a: &Atom) -> f64 {
    match a {
        Atom::Int(v) => *v as f64,
        Atom::Float(v) => *v,
        Atom::Symbol(_) => f64::NAN,
    }
}

fn malformed(form: &str, reason: &str) -> EngineError {
    EngineError::MalformedForm {
        form: form.to_owned(),
        reason: reason.to_owned(),
    }
}

/// Evaluate one form with `env` as the active bindings.
///
/// `rule`, `assert!`, `rassert!` and `when` are special forms; any other
/// compound must be headed by a primitive. Constants and unknown symbols
/// evaluate to themselves.
pub(crate) fn eval(engine: &mut Engine, form: &Term, env: &Bindings) -> Result<Value, EngineError> {
    match form {
        Term::Atom(_) => Ok(Value::Term(form.clone())),
        Term::Var(_) => Ok(Value::Term(env.substitute(form))),
        Term::Compound(items) => match items.split_first() {
            None => Ok(Value::Nil),
            Some((head, args)) => eval_call(engine, env.resolve(head), args, env),
        },
    }
}

fn eval_call(
    engine: &mut Engine,
    head: &Term,
    args: &[Term],
    env: &Bindings,
) -> Result<Value, EngineError> {
    let Some(name) = head.as_symbol() else {
        return Err(EngineError::NotCallable {
            head: head.to_string(),
        });
    };

    match name {
        "rule" => {
            let Some((trigger, body)) = args.split_first() else {
                return Err(malformed(name, "expected a trigger"));
            };
            engine.add_rule_in(Trigger::from_term(trigger.clone()), body.to_vec(), env);
            Ok(Value::Nil)
        }
        "assert!" | "rassert!" => match args {
            [fact] => {
                engine.assert_fact(env.substitute(fact))?;
                Ok(Value::Nil)
            }
            _ => Err(malformed(name, "expected exactly one fact")),
        },
        "when" => match args {
            [test, consequent] => {
                if eval(engine, test, env)?.is_truthy() {
                    eval(engine, consequent, env)
                } else {
                    Ok(Value::Nil)
                }
            }
            _ => Err(malformed(name, "expected a test and a consequent")),
        },
        _ => {
            let Some(primitive) = Primitive::lookup(name) else {
                return Err(EngineError::NotCallable {
                    head: name.to_owned(),
                });
            };
            let values = args
                .iter()
                .map(|arg| eval(engine, arg, env))
                .collect::<Result<Vec<_>, _>>()?;
            primitive.apply(name, &values)
        }
    }
}
