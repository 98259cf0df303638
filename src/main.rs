use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use feast_client::{
    config::ClientConfig,
    models::{CartItem, Currency, FulfilmentMethod, Location, MobileProvider, PaymentMethod},
    services::{
        auth_service,
        cart_service::Cart,
        checkout_service::{self, CheckoutRequest},
        order_service,
        payment_service::{self, CheckoutOutcome},
        restaurant_service, voucher_service,
    },
    state::AppState,
};

#[derive(Debug, Parser)]
#[command(name = "feast", version, about = "Order food and pay from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and print the access token to export as FEAST_TOKEN.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FEAST_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List restaurants with their delivery fee.
    Restaurants {
        #[arg(long)]
        cuisine: Option<String>,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Price a cart file without ordering.
    Quote {
        /// JSON array of cart items.
        cart: PathBuf,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Place an order for a cart file and start payment.
    Checkout {
        cart: PathBuf,
        #[command(flatten)]
        location: LocationArgs,
        /// Collect from the restaurant instead of delivery.
        #[arg(long)]
        collection: bool,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        tip: f64,
        #[command(flatten)]
        payment: PaymentArgs,
    },
    /// Pay for an existing pending order.
    Pay {
        order_id: Uuid,
        #[command(flatten)]
        payment: PaymentArgs,
    },
    /// Show an order.
    Order { order_id: Uuid },
    #[command(subcommand)]
    Voucher(VoucherCommand),
}

#[derive(Debug, Subcommand)]
enum VoucherCommand {
    Balance,
    Deposit { amount: f64 },
}

#[derive(Debug, Args)]
struct LocationArgs {
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
}

impl LocationArgs {
    fn location(&self) -> Option<Location> {
        Some(Location::new(self.lat?, self.lng?))
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Web,
    Mobile,
    Voucher,
}

#[derive(Debug, Args)]
struct PaymentArgs {
    #[arg(long, value_enum, default_value_t = MethodArg::Web)]
    method: MethodArg,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    provider: Option<MobileProvider>,
}

impl PaymentArgs {
    fn payment_method(&self) -> PaymentMethod {
        match self.method {
            MethodArg::Web => PaymentMethod::Web,
            MethodArg::Mobile => PaymentMethod::Mobile {
                phone: self.phone.clone().unwrap_or_default(),
                provider: self.provider,
            },
            MethodArg::Voucher => PaymentMethod::Voucher,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,feast_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let state = AppState::from_config(config);

    match cli.command {
        Command::Login { email, password } => {
            let session = auth_service::login(&state, &email, &password).await?;
            println!("Logged in as {}", session.role);
            println!("export FEAST_TOKEN={}", session.token);
        }
        Command::Restaurants { cuisine, location } => {
            let listings =
                restaurant_service::list_restaurants(&state, cuisine.as_deref(), location.location())
                    .await?;
            if listings.is_empty() {
                println!("No restaurants found");
            }
            for listing in listings {
                println!(
                    "{:<38} {:<28} {} delivery",
                    listing.restaurant.id,
                    listing.restaurant.name,
                    state.config.currency.format(listing.delivery_fee)
                );
            }
        }
        Command::Quote { cart, location } => {
            let cart = load_cart(&cart, &state.config.currency)?;
            let restaurants = state.api.list_restaurants().await.unwrap_or_else(|err| {
                tracing::warn!(error = %err, "restaurant lookup failed, using default delivery fee");
                Vec::new()
            });
            print_cart(&cart);
            let quote = cart.quote(&restaurants, location.location());
            println!("Subtotal      {}", quote.currency.format(quote.subtotal));
            println!("Delivery Fee  {}", quote.currency.format(quote.delivery_fee));
            println!("Total         {}", quote.currency.format(quote.total));
            if let Err(err) = cart.validate_single_restaurant() {
                println!("{err}");
            }
        }
        Command::Checkout {
            cart: path,
            location,
            collection,
            address,
            tip,
            payment,
        } => {
            let mut cart = load_cart(&path, &state.config.currency)?;
            let request = CheckoutRequest {
                fulfilment: if collection {
                    FulfilmentMethod::Collection
                } else {
                    FulfilmentMethod::Delivery
                },
                location: location.location(),
                delivery_address: address,
                payment: payment.payment_method(),
                tip,
            };
            let outcome = checkout_service::submit_checkout(&state, &mut cart, request).await?;
            print_outcome(&outcome);
        }
        Command::Pay { order_id, payment } => {
            let outcome =
                payment_service::pay_order(&state, order_id, &payment.payment_method()).await?;
            print_outcome(&outcome);
        }
        Command::Order { order_id } => {
            let order = order_service::refresh_order(&state, order_id).await?;
            println!("Order #{} ({})", order.short_id(), order_service::status_label(&order.status));
            if order.items.is_empty() {
                println!("No items added yet.");
            }
            for item in &order.items {
                println!("{} x {} - ${:.2}", item.name, item.quantity, item.price);
            }
            println!("Delivery Fee: ${:.2}", order.delivery_fee);
            println!("Total: ${:.2}", order.total_fee);
        }
        Command::Voucher(VoucherCommand::Balance) => {
            let balance = voucher_service::voucher_balance(&state).await?;
            println!("Feast Voucher Balance: ${balance:.2}");
        }
        Command::Voucher(VoucherCommand::Deposit { amount }) => {
            let handoff = voucher_service::deposit_to_voucher(&state, amount).await?;
            println!("Redirecting to PayNow...");
            println!("{}", handoff.url);
        }
    }

    Ok(())
}

fn load_cart(path: &Path, currency: &Currency) -> anyhow::Result<Cart> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read cart file {}", path.display()))?;
    let items: Vec<CartItem> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid cart file {}", path.display()))?;
    Ok(Cart::from_items(currency.clone(), items))
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }
    for item in cart.items() {
        let restaurant = item.restaurant_name.as_deref().unwrap_or("");
        println!(
            "{:>3} x {:<30} {:<20} {}",
            item.quantity,
            item.name,
            restaurant,
            cart.currency().format(item.line_total())
        );
    }
}

fn print_outcome(outcome: &CheckoutOutcome) {
    println!("{}", outcome.message());
    match outcome {
        CheckoutOutcome::HandOff { url, .. } => println!("{url}"),
        CheckoutOutcome::Paid { order_id, .. } | CheckoutOutcome::Failed { order_id, .. } => {
            println!("Order {order_id}")
        }
    }
}
