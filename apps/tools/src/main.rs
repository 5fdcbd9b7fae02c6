use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::{domain::Producto, form::ProductoForm};
use storage::{normalize_database_url, ProductoRepository, Storage, DEFAULT_DATABASE_URL};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every stored producto.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Validate and store a producto the same way the desktop form does.
    Add {
        #[arg(long)]
        nombre: String,
        #[arg(long, default_value = "")]
        descripcion: String,
        #[arg(long, default_value = "")]
        categoria: String,
        #[arg(long, allow_hyphen_values = true)]
        precio: String,
        #[arg(long, allow_hyphen_values = true)]
        stock: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let cli = Cli::parse();
    let storage = open_storage(&cli.database_url).await?;

    match cli.command {
        Command::List { json } => {
            let productos = storage.list_productos().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&productos)?);
            } else {
                for producto in &productos {
                    println!("{}", format_row(producto));
                }
                println!("{} productos", storage.count_productos().await?);
            }
        }
        Command::Add {
            nombre,
            descripcion,
            categoria,
            precio,
            stock,
        } => {
            let form = ProductoForm {
                nombre,
                descripcion,
                categoria,
                precio,
                stock,
            };
            let producto = form.to_producto().context("invalid producto")?;
            let id = storage.insert_producto(&producto).await?;
            tracing::info!(id = id.0, nombre = %producto.nombre, "producto stored");
            println!("created producto_id={}", id.0);
        }
    }

    Ok(())
}

async fn open_storage(raw_database_url: &str) -> Result<Storage> {
    let database_url = normalize_database_url(raw_database_url);
    Storage::new(&database_url)
        .await
        .with_context(|| format!("failed to open database '{database_url}'"))
}

fn format_row(producto: &Producto) -> String {
    format!(
        "{:>5}  {:<24}  {:<16}  {:>10.2}  {:>6}",
        producto.id.0,
        producto.nombre,
        producto.categoria,
        producto.precio_unitario,
        producto.stock
    )
}
