//! One function per subcommand. Each drives the matching screen state from
//! `agua_core::views` and turns an error phase into a failed command.

use agua_core::views::{DetailView, FormPhase, FormView, ListView, Navigation, ProductDraft};
use agua_core::{Category, ProductService};
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Product name
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Unit price, e.g. 5.50
    #[arg(long, default_value = "0")]
    pub price: String,

    /// Units in stock
    #[arg(long, default_value = "0")]
    pub stock: String,

    /// garrafa, pack or botella
    #[arg(long, default_value_t = Category::Garrafa)]
    pub category: Category,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Product id
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub stock: Option<String>,

    #[arg(long)]
    pub category: Option<Category>,
}

impl EditArgs {
    fn apply(self, draft: &mut ProductDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(stock) = self.stock {
            draft.stock = stock;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
    }
}

pub fn list(service: &impl ProductService, format: OutputFormat) -> Result<()> {
    let mut view = ListView::new();
    view.refresh(service);
    if let Some(message) = view.phase().error_message() {
        bail!("{message}");
    }
    output::print_products(view.products(), format);
    Ok(())
}

pub fn show(service: &impl ProductService, id: &str, format: OutputFormat) -> Result<()> {
    let detail = load_detail(service, id)?;
    let product = detail
        .product()
        .ok_or_else(|| anyhow!("product {id} was not loaded"))?;
    output::print_product(product, format);
    Ok(())
}

pub fn create(service: &impl ProductService, args: CreateArgs, format: OutputFormat) -> Result<()> {
    let mut form = FormView::create();
    *form.draft_mut() = ProductDraft {
        name: args.name,
        description: args.description,
        price: args.price,
        stock: args.stock,
        category: args.category,
    };
    submit(service, form, "Producto creado con éxito", format)
}

pub fn edit(service: &impl ProductService, args: EditArgs, format: OutputFormat) -> Result<()> {
    let detail = load_detail(service, &args.id)?;
    let mut form = detail
        .edit()
        .ok_or_else(|| anyhow!("product {} was not loaded", args.id))?;
    args.apply(form.draft_mut());
    submit(service, form, "Producto actualizado con éxito", format)
}

pub fn delete(service: &impl ProductService, id: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("¿Estás seguro de que deseas eliminar este producto?")
            .default(false)
            .interact()
            .context("failed to read confirmation")?;
        if !confirmed {
            println!("Cancelado.");
            return Ok(());
        }
    }

    let mut detail = DetailView::new(id);
    match detail.delete(service) {
        Navigation::Back => {
            output::print_success("Producto eliminado con éxito");
            Ok(())
        }
        Navigation::Stay => bail!(
            "{}",
            detail.phase().error_message().unwrap_or("delete failed")
        ),
    }
}

fn load_detail(service: &impl ProductService, id: &str) -> Result<DetailView> {
    let mut detail = DetailView::new(id);
    detail.load(service);
    if let Some(message) = detail.phase().error_message() {
        bail!("{message}");
    }
    Ok(detail)
}

fn submit(
    service: &impl ProductService,
    mut form: FormView,
    success: &str,
    format: OutputFormat,
) -> Result<()> {
    if form.submit(service) == Navigation::Stay {
        bail!("{}", form.alert().unwrap_or("save failed"));
    }
    output::print_success(success);
    if let FormPhase::Saved(product) = form.phase() {
        output::print_product(product, format);
    }
    Ok(())
}
