//! Declarative matching engine for command-line and configuration-line
//! options.
//!
//! Callers register options, each a [`Matcher`] deciding whether it applies
//! at the current [`Cursor`] and a [`Taker`] consuming values through the
//! [`Scanner`] value engine. A parse resolves one option per step by
//! priority and writes results into [`Bindings`]. Option definitions are
//! stored as tagged records in a [`RecordStore`], which host programs can
//! reuse for their own record bundles.
//!
//! ```
//! use optmatch::{Cli, FlagKind, TokenStream, Taker, ValueSpec};
//!
//! let mut cli = Cli::new();
//! cli.add_option(
//!     "--sum",
//!     Taker::append("sum", ValueSpec::integer(), 1, None).expect("identifier"),
//!     &["Numbers to add."],
//! )
//! .expect("valid option");
//! cli.define_flag(FlagKind::Boolean, "-v --verbose", "false", &["Chatty output."])
//!     .expect("valid flag");
//!
//! cli.parse(&TokenStream::new(["--sum", "1", "2", "-v"]))
//!     .expect("parse succeeds");
//! assert_eq!(cli.bindings().get_list("sum").map(<[String]>::len), Some(2));
//! assert_eq!(cli.bindings().get_bool("verbose"), Some(true));
//! ```

mod bindings;
mod cli;
mod cursor;
mod docs;
mod driver;
mod error;
mod flag;
mod matcher;
mod registry;
mod store;
mod value;

pub use bindings::{Bindings, BoundValue};
pub use cli::Cli;
pub use cursor::{Cursor, CursorParseError, TokenStream, is_option_shaped};
pub use docs::OptionDoc;
pub use driver::{HELP_EXIT, PARSE_FAILURE_EXIT, Resolution, render_failure, report};
pub use error::{DefinitionError, ErrorKind, MatchFailure, ParseError, ParseResult, TakeError};
pub use flag::{FlagKind, define_flag};
pub use matcher::{AliasSet, IntoMatcher, Matcher, Priority};
pub use registry::{
    DEFAULT_HELP_ALIASES, DOC_TAG, IntoTaker, MATCHER_TAG, Registry, TAKER_TAG, TakeContext, Taker,
    render_help,
};
pub use store::{Attribute, Record, RecordPos, RecordStore};
pub use value::{Check, Rejection, Scanner, ValueError, ValueSpec};
