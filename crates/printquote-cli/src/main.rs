use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use printquote_core::analysis::Estimator;
use printquote_core::catalog::{Catalog, Product};
use printquote_core::config::StoreConfig;
use printquote_core::pricing::{price_cart, CartLine};
use printquote_core::{Material, MaterialProfile};
use printquote_invoice::{Customer, Invoice, SEQUENCE_MAX, SEQUENCE_MIN};
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "printquote")]
#[command(about = "Quote 3D prints from STL uploads and price filament carts.")]
struct Cli {
    /// JSON store configuration; missing fields keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate volume, weight and cost of an STL model.
    Quote {
        input: PathBuf,
        #[arg(long)]
        material: String,
        #[arg(long, default_value = "")]
        code: String,
        #[arg(long)]
        report: Option<PathBuf>,
        #[arg(long)]
        max_upload_mb: Option<u64>,
        #[command(flatten)]
        invoice: InvoiceArgs,
    },
    /// Price a filament cart, e.g. `--item pla_white=2 --item abs_red=1`.
    Cart {
        #[arg(long = "item", value_parser = parse_item, required = true)]
        items: Vec<CartLine>,
        #[arg(long, default_value = "")]
        code: String,
        #[arg(long)]
        report: Option<PathBuf>,
        #[command(flatten)]
        invoice: InvoiceArgs,
    },
    /// List materials and filament spools.
    Catalog,
}

#[derive(Debug, Args)]
struct InvoiceArgs {
    /// Write an invoice record here.
    #[arg(long)]
    invoice: Option<PathBuf>,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
}

impl InvoiceArgs {
    fn customer(&self) -> Customer {
        Customer {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Quote {
            input,
            material,
            code,
            report,
            max_upload_mb,
            invoice,
        } => {
            if let Some(mb) = max_upload_mb {
                cfg.max_upload_bytes = mb.saturating_mul(1024 * 1024);
            }
            quote(&cfg, &input, &material, &code, report.as_deref(), &invoice)
        }
        Command::Cart {
            items,
            code,
            report,
            invoice,
        } => cart(&cfg, &items, &code, report.as_deref(), &invoice),
        Command::Catalog => emit_json(None, &catalog_listing(&Catalog::filaments()), "catalog"),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<StoreConfig> {
    let Some(path) = path else {
        return Ok(StoreConfig::default());
    };
    let raw = std::fs::read_to_string(path).with_context(|| format!("read config: {path:?}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parse config: {path:?}"))
}

fn quote(
    cfg: &StoreConfig,
    input: &Path,
    material: &str,
    code: &str,
    report: Option<&Path>,
    invoice: &InvoiceArgs,
) -> Result<()> {
    ensure_input_file(input)?;
    let material: Material = material.parse()?;

    let (encoding, mesh) = printquote_import_stl::import_stl(input, cfg.max_upload_bytes)?;
    let estimator = Estimator::new(cfg.estimate);
    let report_data = estimator.report(encoding.as_str(), &mesh, material, code);

    if let Some(path) = invoice.invoice.as_deref() {
        let (date, sequence) = invoice_stamp(Local::now().date_naive());
        let record =
            printquote_invoice::from_quote(&report_data.quote, invoice.customer(), date, sequence)?;
        write_invoice(path, &record)?;
    }

    emit_json(report, &report_data, "report")
}

fn cart(
    cfg: &StoreConfig,
    items: &[CartLine],
    code: &str,
    report: Option<&Path>,
    invoice: &InvoiceArgs,
) -> Result<()> {
    let totals = price_cart(items, &Catalog::filaments(), code, &cfg.cart)?;

    if let Some(path) = invoice.invoice.as_deref() {
        let (date, sequence) = invoice_stamp(Local::now().date_naive());
        let record = printquote_invoice::from_cart(&totals, invoice.customer(), date, sequence)?;
        write_invoice(path, &record)?;
    }

    emit_json(report, &totals, "cart totals")
}

fn invoice_stamp(date: NaiveDate) -> (NaiveDate, u16) {
    let sequence = rand::thread_rng().gen_range(SEQUENCE_MIN..=SEQUENCE_MAX);
    (date, sequence)
}

#[derive(Debug, Serialize)]
struct MaterialListing<'a> {
    #[serde(flatten)]
    profile: &'static MaterialProfile,
    spools: Vec<&'a Product>,
}

/// Every material with the spools the catalog stocks for it.
fn catalog_listing(catalog: &Catalog) -> Vec<MaterialListing<'_>> {
    MaterialProfile::all()
        .iter()
        .map(|profile| MaterialListing {
            profile,
            spools: catalog.by_material(profile.material).collect(),
        })
        .collect()
}

fn write_invoice(path: &Path, record: &Invoice) -> Result<()> {
    let json = serde_json::to_string_pretty(record).context("serialize invoice")?;
    write_file(path, &json).with_context(|| format!("write invoice: {path:?}"))?;
    tracing::info!(number = %record.number, ?path, "wrote invoice");
    Ok(())
}

fn emit_json<T: Serialize>(path: Option<&Path>, value: &T, what: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(value).with_context(|| format!("serialize {what}"))?;
    match path {
        Some(path) => write_file(path, &json).with_context(|| format!("write {what}: {path:?}")),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::write(path, contents)
}

fn parse_item(raw: &str) -> Result<CartLine, String> {
    let (id, qty) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PRODUCT=QTY, got {raw:?}"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing product id in {raw:?}"));
    }
    let quantity = qty
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad quantity in {raw:?}: {e}"))?;
    Ok(CartLine::new(id, quantity))
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}
