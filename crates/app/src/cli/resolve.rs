use clap::Args;
use jiff::Timestamp;
use rebate::{cart::CartLine, ids::StoreUuid};
use rebate_app::{
    config::{CatalogConfig, ResolverConfig},
    context::AppContext,
    domain::discounts::{ResolveError, data::ResolveRequest},
};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::response::ResolveResponse;

#[derive(Debug, Args)]
pub(crate) struct ResolveArgs {
    /// Store the code is entered in
    #[arg(long, env = "REBATE_STORE_UUID")]
    store: Option<Uuid>,

    /// Code as typed by the customer
    #[arg(long)]
    code: String,

    /// Cart total
    #[arg(long, default_value_t = Decimal::ZERO)]
    cart_total: Decimal,

    /// Customer email
    #[arg(long)]
    email: Option<String>,

    /// Cart line as PRODUCT_UUID[:QUANTITY]; repeat for more lines
    #[arg(long = "item", value_parser = parse_cart_line)]
    items: Vec<CartLine>,

    /// Evaluate the rules at this instant instead of now
    #[arg(long)]
    at: Option<Timestamp>,

    #[command(flatten)]
    source: CatalogConfig,

    #[command(flatten)]
    resolver: ResolverConfig,
}

impl ResolveArgs {
    fn into_request(self) -> ResolveRequest {
        ResolveRequest {
            store: self.store.map(StoreUuid::from_uuid),
            code: self.code,
            cart_total: self.cart_total,
            customer_email: self.email,
            cart: (!self.items.is_empty()).then_some(self.items),
            point_in_time: self.at.unwrap_or_else(Timestamp::now),
        }
    }
}

pub(crate) async fn run(args: ResolveArgs) -> Result<(), String> {
    let context = AppContext::from_source(args.source.source(), args.resolver.into())
        .await
        .map_err(|error| error.to_string())?;

    let response = match context.discounts.resolve_discount(args.into_request()).await {
        Ok(resolution) => ResolveResponse::from(&resolution),
        Err(ResolveError::Rejected(rejection)) => ResolveResponse::from(&rejection),
        Err(ResolveError::Repository(source)) => {
            return Err(format!("failed to resolve discount code: {source}"));
        }
    };

    let json = serde_json::to_string_pretty(&response)
        .map_err(|error| format!("failed to encode response: {error}"))?;

    println!("{json}");

    Ok(())
}

fn parse_cart_line(raw: &str) -> Result<CartLine, String> {
    let (product, quantity) = raw.split_once(':').unwrap_or((raw, "1"));

    let product = product
        .trim()
        .parse::<Uuid>()
        .map_err(|error| format!("invalid product uuid {product:?}: {error}"))?;

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("invalid quantity {quantity:?}: {error}"))?;

    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }

    Ok(CartLine::new(product.into(), quantity))
}
