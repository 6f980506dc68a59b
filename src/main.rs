//! # Forecourt Admin Console Entry Point
//!
//! Wires configuration, session, HTTP client, cache, and the boards
//! together, then runs one subcommand against the configured backend.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use forecourt::client::view_models::{
    sell_order_stats, stats, CategoryDelete, CategoryFilter, CategoryForm, CustomOrderBoard,
    DashboardBoard, LoginForm, SellOrderBoard,
};
use forecourt::cmd_args::{Command, CommandLineArgs};
use forecourt::{ApiClient, CatalogApi, Config, MutationExecutor, QueryCache, SessionStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = CommandLineArgs::parse();
    let mut config = Config::from_env().context("configuration is incomplete")?;
    if let Some(base_url) = args.base_url() {
        config.api_base_url = base_url.to_string();
    }

    let session = Arc::new(SessionStore::new(config.session_cookie.clone()));
    let client = ApiClient::new(config.api_base_url.clone(), Arc::clone(&session))?;
    let api = CatalogApi::new(client);
    let cache = Arc::new(QueryCache::new());

    match args.command().clone() {
        Command::Cars {
            search,
            category,
            page,
        } => {
            let mut board = DashboardBoard::new(Arc::clone(&cache), api.clone());
            board.set_search(search);
            if let Some(name) = category {
                board.set_filter(CategoryFilter::Named(name));
            }

            let cars = board.cars().await;
            if let Some(message) = cars.error.as_deref() {
                bail!("could not load cars: {message}");
            }
            let cars = cars.data.unwrap_or_default();
            let categories = board.categories().await.data.unwrap_or_default();

            let summary = stats(&cars, &categories);
            println!(
                "{} cars, {} brands, {} categories, avg price NGN {}",
                summary.total_cars,
                summary.total_brands,
                summary.total_categories,
                summary.average_price
            );

            // An out-of-range page request is simply ignored.
            board.view(&cars);
            board.go_to_page(page);
            let view = board.view(&cars);
            println!(
                "page {}/{} (showing {}-{} of {})",
                view.page, view.total_pages, view.first_index, view.last_index, view.filtered_len
            );
            for car in &view.items {
                println!(
                    "  [{}] {} - {} {} ({}), NGN {}",
                    car.id, car.title, car.brand_name, car.model, car.year, car.price
                );
            }
        }
        Command::Car { id } => {
            let car = api.fetch_car(&id).await?;
            println!("{} - {} {} ({})", car.title, car.brand_name, car.model, car.year);
            println!("  category: {}", car.category);
            println!("  price:    NGN {}", car.price);
            println!("  main:     {}", car.image_url);
            for url in &car.car_gallery {
                println!("  gallery:  {url}");
            }
        }
        Command::Categories => {
            let categories = api.fetch_categories().await?;
            for category in categories {
                println!("{}", category.name);
            }
        }
        Command::DeleteCar { id } => {
            let mut board = DashboardBoard::new(Arc::clone(&cache), api.clone());
            board
                .delete_car(&id)
                .await
                .with_context(|| format!("could not delete car {id}"))?;
            println!("deleted car {id}");
        }
        Command::CreateCategory { name, thumbnail } => {
            let store: Arc<dyn forecourt::ImageStore> =
                Arc::new(forecourt::RemoteImageStore::new(&config));
            let executor = MutationExecutor::new(Arc::clone(&cache));

            let mut form = CategoryForm::new();
            form.set_name(name.clone());
            if let Some(path) = thumbnail {
                let image = forecourt::client::services::LocalImage::from_path(&path)
                    .with_context(|| format!("could not read {}", path.display()))?;
                form.set_thumbnail(image);
            }
            form.submit(&api, &executor, &store)
                .await
                .context("could not create category")?;
            println!("created category {name}");
        }
        Command::DeleteCategory { name, yes } => {
            if !yes {
                bail!("deleting '{name}' is destructive; re-run with --yes to confirm");
            }
            let mut confirmation = CategoryDelete::new();
            confirmation.request(name.clone());
            let executor = MutationExecutor::new(Arc::clone(&cache));
            confirmation.confirm(&api, &executor).await?;
            println!("deleted category {name}");
        }
        Command::SellOrders { search } => {
            let mut board = SellOrderBoard::new(Arc::clone(&cache), api.clone());
            board.set_search(search);

            let orders = board.orders().await;
            if let Some(message) = orders.error.as_deref() {
                bail!("could not load sell orders: {message}");
            }
            let orders = orders.data.unwrap_or_default();
            let summary = sell_order_stats(&orders);
            println!(
                "{} listings, {} makes, {} locations",
                summary.total_listings, summary.unique_makes, summary.unique_locations
            );
            for order in board.visible(&orders) {
                println!(
                    "  {} - {} {} ({}) in {}, asking {} [{} photos]",
                    order.fullname,
                    order.make,
                    order.model,
                    order.year,
                    order.location,
                    order.price,
                    order.images.len()
                );
            }
            if board.has_more(&orders) {
                println!("  ... more available");
            }
        }
        Command::CustomOrders { search } => {
            let mut board = CustomOrderBoard::new(Arc::clone(&cache), api.clone());
            board.set_search(search);

            let orders = board.orders().await;
            if let Some(message) = orders.error.as_deref() {
                bail!("could not load custom orders: {message}");
            }
            let orders = orders.data.unwrap_or_default();
            for order in board.visible(&orders) {
                println!(
                    "  {} wants a {} {} ({})",
                    order.fullname, order.make, order.model, order.year
                );
            }
        }
        Command::Login { email, remember } => {
            let password = read_password()?;
            let mut form = LoginForm::new();
            form.email = email;
            form.password = password;
            form.remember = remember;
            form.submit(&api, &session).await.context("login failed")?;
            println!("logged in; session valid: {}", session.is_valid());
        }
    }

    Ok(())
}

/// Password comes from `FORECOURT_PASSWORD` when set, otherwise from
/// stdin (piped use).
fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var("FORECOURT_PASSWORD") {
        return Ok(password);
    }
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("could not read password from stdin")?;
    Ok(line.trim_end().to_string())
}
