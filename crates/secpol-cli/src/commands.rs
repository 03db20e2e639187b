use anyhow::Context;
use secpol_core::{
    load_policy, FeatureOracle, FixedFeatures, LexicalResolver, PathResolver, Ruleset,
    SystemFeatures, SystemResolver,
};

use crate::cli::{Cli, Command, CompileArgs};
use crate::exit_codes;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Compile(args) => {
            let Some(ruleset) = compile(&args)? else {
                return Ok(exit_codes::POLICY_INVALID);
            };
            let json = serde_json::to_string_pretty(&ruleset)
                .context("serializing compiled ruleset")?;
            println!("{json}");
            Ok(exit_codes::SUCCESS)
        }
        Command::Check(args) => {
            let Some(ruleset) = compile(&args)? else {
                return Ok(exit_codes::POLICY_INVALID);
            };
            eprintln!("ok: {} rules", ruleset.len());
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Run one compile. `Ok(None)` means the policy was rejected and the
/// diagnostic has already been printed.
fn compile(args: &CompileArgs) -> anyhow::Result<Option<Ruleset>> {
    let resolver: Box<dyn PathResolver> = if args.no_resolve {
        Box::new(LexicalResolver)
    } else {
        Box::new(SystemResolver)
    };
    let oracle: Box<dyn FeatureOracle> = if args.probe {
        Box::new(SystemFeatures)
    } else if args.features.is_empty() {
        Box::new(FixedFeatures::all())
    } else {
        let mut fixed = FixedFeatures::none();
        for name in &args.features {
            fixed = fixed.with(name);
        }
        Box::new(fixed)
    };

    match load_policy(&args.file, resolver.as_ref(), oracle.as_ref()) {
        Ok(ruleset) => {
            tracing::info!(
                file = %args.file.display(),
                rules = ruleset.len(),
                "policy compiled"
            );
            Ok(Some(ruleset))
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(None)
        }
    }
}
