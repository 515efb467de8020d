//! Integration tests for typed flags, help requests, and typed extraction.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface configuration mistakes"
)]

use anyhow::{Result, anyhow, ensure};
use optmatch::{Cli, ErrorKind, FlagKind, HELP_EXIT, TokenStream, report};
use rstest::{fixture, rstest};
use serde::Deserialize;

#[fixture]
fn cli() -> Cli {
    let mut cli = Cli::new();
    cli.define_flag(FlagKind::Boolean, "vb", "false", &["Verbose output."])
        .expect("valid flag");
    cli.define_flag(FlagKind::Integer, "-e --epochs", "10", &["Training passes."])
        .expect("valid flag");
    cli.define_flag(FlagKind::Float, "rate", "0.01", &["Learning rate."])
        .expect("valid flag");
    cli.define_flag(FlagKind::String, "model_name", "baseline", &["Model label."])
        .expect("valid flag");
    cli
}

#[rstest]
#[case(&["--vb"], true)]
#[case(&["--no-vb"], false)]
#[case(&["--vb=0"], false)]
#[case(&["--vb=true"], true)]
#[case(&["--vb", "--no-vb"], false)]
#[case(&["--no-vb", "--vb=TRUE"], true)]
fn boolean_round_trip(mut cli: Cli, #[case] tokens: &[&str], #[case] expected: bool) -> Result<()> {
    cli.parse(&TokenStream::new(tokens.iter().copied()))
        .map_err(|err| anyhow!(err))?;
    ensure!(cli.bindings().get_bool("vb") == Some(expected), "{tokens:?}");
    Ok(())
}

#[derive(Debug, Deserialize, PartialEq)]
struct Training {
    vb: bool,
    epochs: i64,
    rate: f64,
    model_name: String,
}

#[rstest]
fn flags_extract_into_typed_settings(mut cli: Cli) -> Result<()> {
    cli.parse(&TokenStream::new(["-e", "3", "--vb", "--model-name", "wide"]))
        .map_err(|err| anyhow!(err))?;
    let training: Training = cli.extract().map_err(|err| anyhow!(err))?;
    ensure!(
        training
            == Training {
                vb: true,
                epochs: 3,
                rate: 0.01,
                model_name: "wide".to_owned(),
            },
        "{training:?}"
    );
    Ok(())
}

#[rstest]
fn scoped_redefinitions_restore_outer_values(mut cli: Cli) -> Result<()> {
    cli.parse(&TokenStream::new(["--epochs", "4"])).map_err(|err| anyhow!(err))?;
    let inner = cli.scoped(|inner| -> Result<Option<i64>> {
        inner
            .define_flag(FlagKind::Integer, "-e --epochs", "1", &[])
            .map_err(|err| anyhow!(err))?;
        inner.parse_line("--epochs 9").map_err(|err| anyhow!(err))?;
        Ok(inner.bindings().get_int("epochs"))
    })?;
    ensure!(inner == Some(9));
    ensure!(cli.bindings().get_int("epochs") == Some(4));
    ensure!(cli.bindings().default_of("epochs") == Some("10"));
    Ok(())
}

#[rstest]
fn help_is_a_display_request(mut cli: Cli) -> Result<()> {
    cli.add_help(None, Some("Usage: train [options]"))
        .map_err(|err| anyhow!(err))?;
    let tokens = TokenStream::new(["--epochs", "2", "--help"]);
    let err = cli
        .parse(&tokens)
        .err()
        .ok_or_else(|| anyhow!("help should interrupt the parse"))?;
    ensure!(err.is_display_request());
    ensure!(err.kind() == ErrorKind::DisplayHelp);
    let text = err.help_text().unwrap_or_default();
    ensure!(text.starts_with("Usage: train [options]\n\n"), "{text}");
    ensure!(text.contains("  -e, --epochs"), "{text}");
    ensure!(text.contains("Default: 10"), "{text}");
    ensure!(text.contains("  --no-vb"), "{text}");
    ensure!(text.contains("  -h, --help"), "{text}");
    ensure!(report(&err, &tokens) == HELP_EXIT);
    Ok(())
}

#[rstest]
fn unknown_boolean_spellings_are_rejected(mut cli: Cli) -> Result<()> {
    let err = cli
        .parse(&TokenStream::new(["--vb=T"]))
        .err()
        .ok_or_else(|| anyhow!("T is not a boolean spelling"))?;
    ensure!(err.kind() == ErrorKind::Take, "kind {:?}", err.kind());
    ensure!(cli.bindings().get_bool("vb") == Some(false));
    Ok(())
}

#[rstest]
fn short_help_alias_works_inside_lines(mut cli: Cli) -> Result<()> {
    cli.add_help(Some("-? --usage"), Some("Usage"))
        .map_err(|err| anyhow!(err))?;
    let err = cli
        .parse_line("-?")
        .err()
        .ok_or_else(|| anyhow!("help expected"))?;
    ensure!(err.is_display_request());
    Ok(())
}
