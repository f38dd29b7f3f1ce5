//! The host-facing operations.
//!
//! Every call runs the same pipeline: load the document from argument 0,
//! resolve or mutate one level, render the result as host text. A null
//! argument 0 short-circuits to a null result before anything is parsed.
//! Each stage either hands its output to the next or ends the call; nothing
//! a call allocates outlives it.
//!
//! Results follow the host's three-way contract: `Ok(Some(_))` is a value,
//! `Ok(None)` is a null result, `Err(_)` is an error result. Diagnostics go
//! to the [`log`] facade rather than into results.

use std::time::Instant;

use bstr::{BStr, ByteSlice};
use log::{debug, error, info, warn};

use crate::{
    Coercion, Error, HostArg, HostValue, Operation, Options, Segment, Value, accessor,
    host::{host_scalar_to_json, json_to_host_text, parse_decimal},
    loader, mutator,
};

/// Returned by `size` for documents that are neither objects nor arrays.
pub const NOT_SIZED: i64 = -1;

/// Execution context for one host session.
///
/// Holds the session's [`Options`]; calls on one context never share any
/// other state, and separate contexts may be used from separate threads.
///
/// ```
/// use jsonedit::{Context, args};
///
/// let ctx = Context::default();
/// let doc = r#"{"a":1,"b":2}"#;
/// assert_eq!(ctx.get(&args![doc, "a"]).unwrap().as_deref(), Some("1"));
/// assert_eq!(
///     ctx.set(&args![doc, "a", 99]).unwrap().as_deref(),
///     Some(r#"{"a":99,"b":2}"#)
/// );
/// assert_eq!(ctx.size(&args![doc]).unwrap(), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    options: Options,
}

/// A loaded argument 0, kept with its source text for diagnostics.
struct Document<'a> {
    raw: &'a BStr,
    root: Value,
}

/// What argument 1 addresses.
enum Addressed<'a> {
    At(Segment<'a>),
    /// Null or empty: the call leaves the document alone.
    Nowhere,
    /// A real or decimal: the call yields a null result.
    Unsupported,
}

fn arg<'a>(args: &[HostArg<'a>], index: usize) -> HostArg<'a> {
    args.get(index).copied().flatten()
}

impl Context {
    /// A context using `options`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// The session's current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Number of entries of an object or elements of an array.
    ///
    /// Any other document yields [`NOT_SIZED`].
    pub fn size(&self, args: &[HostArg<'_>]) -> Result<Option<i64>, Error> {
        self.timed(Operation::Size, || -> Result<Option<i64>, Error> {
            let Some(doc) = self.load_document(Operation::Size, args)? else {
                return Ok(None);
            };
            let size = doc
                .root
                .len()
                .map_or(NOT_SIZED, |n| i64::try_from(n).unwrap_or(i64::MAX));
            Ok(Some(size))
        })
    }

    /// The value at a key or position, as host text.
    ///
    /// Missing keys, out-of-range positions and JSON null all yield a null
    /// result.
    pub fn get(&self, args: &[HostArg<'_>]) -> Result<Option<String>, Error> {
        const OP: Operation = Operation::Get;
        self.timed(OP, || -> Result<Option<String>, Error> {
            let Some(doc) = self.load_document(OP, args)? else {
                return Ok(None);
            };
            let Addressed::At(segment) = self.segment(OP, &doc, arg(args, 1))? else {
                return Ok(None);
            };
            match accessor::get(&doc.root, &segment) {
                Ok(Some(value)) => Ok(json_to_host_text(value, self.options.real_format)),
                Ok(None) => Ok(None),
                Err(err) => Err(self.fail(OP, &doc, err)),
            }
        })
    }

    /// The whole document after storing argument 2 at a key or position.
    ///
    /// Unlike `get`, an index outside the array is an error.
    pub fn set(&self, args: &[HostArg<'_>]) -> Result<Option<String>, Error> {
        const OP: Operation = Operation::Set;
        self.timed(OP, || -> Result<Option<String>, Error> {
            let Some(mut doc) = self.load_document(OP, args)? else {
                return Ok(None);
            };
            let segment = match self.segment(OP, &doc, arg(args, 1))? {
                Addressed::At(segment) => segment,
                Addressed::Nowhere => return Ok(self.render(&doc)),
                Addressed::Unsupported => return Ok(None),
            };
            let Some(value) = self.value(OP, &doc, arg(args, 2))? else {
                return Ok(self.render(&doc));
            };
            if let Err(err) = mutator::set(&mut doc.root, &segment, value) {
                return Err(self.fail(OP, &doc, err));
            }
            Ok(self.render(&doc))
        })
    }

    /// The whole document after removing a key or position.
    ///
    /// Removing a key the object lacks returns the document unchanged; a
    /// position outside the array yields a null result.
    pub fn unset(&self, args: &[HostArg<'_>]) -> Result<Option<String>, Error> {
        const OP: Operation = Operation::Unset;
        self.timed(OP, || -> Result<Option<String>, Error> {
            let Some(mut doc) = self.load_document(OP, args)? else {
                return Ok(None);
            };
            let segment = match self.segment(OP, &doc, arg(args, 1))? {
                Addressed::At(segment) => segment,
                Addressed::Nowhere => return Ok(self.render(&doc)),
                Addressed::Unsupported => return Ok(None),
            };
            match mutator::unset(&mut doc.root, &segment) {
                Ok(_) => Ok(self.render(&doc)),
                Err(err @ Error::Range { .. }) => {
                    debug!("{OP} - {err}");
                    Ok(None)
                }
                Err(err @ Error::UnsupportedSegment(_)) => {
                    warn!("{OP} - {err}");
                    Ok(None)
                }
                Err(err) => Err(self.fail(OP, &doc, err)),
            }
        })
    }

    /// The whole array after pushing argument 1 onto its end.
    pub fn append(&self, args: &[HostArg<'_>]) -> Result<Option<String>, Error> {
        const OP: Operation = Operation::Append;
        self.timed(OP, || -> Result<Option<String>, Error> {
            let Some(mut doc) = self.load_document(OP, args)? else {
                return Ok(None);
            };
            if !doc.root.is_array() {
                let err = Error::TypeMismatch(format!("'{}' is not a JSON array", doc.raw));
                error!("{OP} - {err}");
                return Err(err);
            }
            let Some(value) = self.value(OP, &doc, arg(args, 1))? else {
                return Ok(self.render(&doc));
            };
            if let Err(err) = mutator::append(&mut doc.root, value) {
                return Err(self.fail(OP, &doc, err));
            }
            Ok(self.render(&doc))
        })
    }

    /// Reads or changes a session option.
    ///
    /// `config(name)` reads, `config(name, value)` writes and returns the new
    /// setting. The only option is `benchmark`; any other name returns the
    /// text `unknown parameter`.
    ///
    /// ```
    /// use jsonedit::{Context, args};
    ///
    /// let mut ctx = Context::default();
    /// assert_eq!(ctx.config(&args!["benchmark"]).unwrap().as_deref(), Some("0"));
    /// assert_eq!(ctx.config(&args!["benchmark", 1]).unwrap().as_deref(), Some("1"));
    /// assert!(ctx.options().benchmark);
    /// assert_eq!(ctx.config(&args!["colour"]).unwrap().as_deref(), Some("unknown parameter"));
    /// ```
    pub fn config(&mut self, args: &[HostArg<'_>]) -> Result<Option<String>, Error> {
        const OP: Operation = Operation::Config;
        let name = match arg(args, 0) {
            None => return Ok(None),
            Some(HostValue::Text(name)) => name,
            Some(other) => {
                let err = Error::TypeMismatch(format!(
                    "the <name> argument must be text, got {} - {}",
                    other.kind(),
                    OP.usage()
                ));
                error!("{OP} - {err}");
                return Err(err);
            }
        };
        if name != b"benchmark" {
            debug!("{OP} - unknown parameter '{}'", name.as_bstr());
            return Ok(Some("unknown parameter".to_owned()));
        }
        if let Some(value) = arg(args, 1) {
            self.options.benchmark = truthy(value);
            info!("{OP} - benchmark = {}", self.options.benchmark);
        }
        Ok(Some(if self.options.benchmark { "1" } else { "0" }.to_owned()))
    }

    // ------------------------------------------------------------------------
    // Stages
    // ------------------------------------------------------------------------

    fn load_document<'a>(
        &self,
        op: Operation,
        args: &[HostArg<'a>],
    ) -> Result<Option<Document<'a>>, Error> {
        let bytes = match arg(args, 0) {
            None | Some(HostValue::Text([])) => return Ok(None),
            Some(HostValue::Text(bytes)) => bytes,
            Some(other) => {
                let err = Error::TypeMismatch(format!(
                    "the <json> argument must be text, got {} - {}",
                    other.kind(),
                    op.usage()
                ));
                error!("{op} - {err}");
                return Err(err);
            }
        };
        match loader::load_with_depth(bytes, self.options.max_depth) {
            Ok(root) => Ok(Some(Document {
                raw: bytes.as_bstr(),
                root,
            })),
            Err(err) => {
                error!(
                    "{op} - '{}' is not valid JSON - line {}: {err}",
                    bytes.as_bstr(),
                    err.line
                );
                Err(err.into())
            }
        }
    }

    fn segment<'a>(
        &self,
        op: Operation,
        doc: &Document<'_>,
        arg: HostArg<'a>,
    ) -> Result<Addressed<'a>, Error> {
        let Some(value) = arg else {
            return Ok(Addressed::Nowhere);
        };
        match Segment::from_host(value) {
            Ok(Some(segment)) => Ok(Addressed::At(segment)),
            Ok(None) => Ok(Addressed::Nowhere),
            Err(err @ Error::UnsupportedSegment(_)) => {
                warn!("{op} - {err}");
                Ok(Addressed::Unsupported)
            }
            Err(err) => Err(self.fail(op, doc, err)),
        }
    }

    fn value(
        &self,
        op: Operation,
        doc: &Document<'_>,
        arg: HostArg<'_>,
    ) -> Result<Option<Value>, Error> {
        let Some(value) = arg else {
            return Ok(None);
        };
        host_scalar_to_json(value, Coercion::Structured, self.options.max_depth)
            .map(Some)
            .map_err(|err| self.fail(op, doc, err))
    }

    fn render(&self, doc: &Document<'_>) -> Option<String> {
        json_to_host_text(&doc.root, self.options.real_format)
    }

    fn fail(&self, op: Operation, doc: &Document<'_>, err: Error) -> Error {
        error!("{op} - {err} (json={})", doc.raw);
        err
    }

    fn timed<T>(&self, op: Operation, f: impl FnOnce() -> T) -> T {
        if !self.options.benchmark {
            return f();
        }
        let start = Instant::now();
        let out = f();
        info!("{op} took {:?}", start.elapsed());
        out
    }
}

fn truthy(value: HostValue<'_>) -> bool {
    match value {
        HostValue::Integer(n) => n != 0,
        HostValue::Real(n) => n != 0.0,
        HostValue::Decimal(bytes) => parse_decimal(bytes) != 0.0,
        HostValue::Text(bytes) => {
            let text = bytes.trim_ascii();
            [&b"1"[..], b"true", b"on", b"yes"]
                .iter()
                .any(|word| text.eq_ignore_ascii_case(word))
        }
    }
}
