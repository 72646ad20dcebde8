use anyhow::{Context, Result};
use heritage_solver::{
    ClassStore, ClosureConfig, DuplicatePolicy, HierarchyDescription, TypeExpr, TypeFormatter,
    linear_ancestors, resolve_closure_with,
};
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::cli::args::{CliArgs, Command, MroArgs, ResolveArgs};

/// Run one CLI command, writing its output to `out`.
pub fn run(args: &CliArgs, out: &mut impl Write) -> Result<()> {
    match &args.command {
        Command::Resolve(resolve) => run_resolve(resolve, out),
        Command::Mro(mro) => run_mro(mro, out),
    }
}

/// Read and register a hierarchy description file.
pub fn load_hierarchy(path: &Path) -> Result<ClassStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read hierarchy {}", path.display()))?;
    let description = HierarchyDescription::from_json(&text)
        .with_context(|| format!("invalid hierarchy {}", path.display()))?;
    let store = description
        .build()
        .with_context(|| format!("failed to register hierarchy {}", path.display()))?;
    debug!(path = %path.display(), classes = store.len(), "hierarchy loaded");
    Ok(store)
}

fn run_resolve(args: &ResolveArgs, out: &mut impl Write) -> Result<()> {
    let store = load_hierarchy(&args.hierarchy.hierarchy)?;
    let expr = store
        .parse(&args.ty)
        .with_context(|| format!("invalid type expression `{}`", args.ty))?;

    let mut config = ClosureConfig::default();
    if args.keep_duplicates {
        config.duplicates = DuplicatePolicy::Keep;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }

    let closure = resolve_closure_with(&store, &expr, &config)
        .with_context(|| format!("cannot resolve `{}`", args.ty))?;
    write_types(&store, &closure, args.json, out)
}

fn run_mro(args: &MroArgs, out: &mut impl Write) -> Result<()> {
    let store = load_hierarchy(&args.hierarchy.hierarchy)?;
    let id = store
        .lookup(args.class.trim())
        .with_context(|| format!("unknown class `{}`", args.class))?;
    let mro: Vec<TypeExpr> = linear_ancestors(&store, id)?
        .into_iter()
        .map(TypeExpr::Class)
        .collect();
    write_types(&store, &mro, args.json, out)
}

fn write_types(
    store: &ClassStore,
    types: &[TypeExpr],
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let formatter = TypeFormatter::new(store);
    if json {
        let names: Vec<String> = types.iter().map(|ty| formatter.format(ty)).collect();
        serde_json::to_writer_pretty(&mut *out, &names)?;
        writeln!(out)?;
    } else {
        for ty in types {
            writeln!(out, "{}", formatter.format(ty))?;
        }
    }
    Ok(())
}
