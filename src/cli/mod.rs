use crate::{
    config::StorefrontConfig,
    core::{QueryParams, Route, SearchFilters},
    pages::{SupplierDashboard, SEARCH_PATH},
    types::{HotelForm, TravelStyle},
    Storefront,
};
use anyhow::{anyhow, bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

/// CLI entry point for the storefront tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("storefront")
        .version("0.1.0")
        .about("Search hotels, book stays and plan trips against the storefront APIs")
        .subcommand_required(true)
        .arg(
            Arg::new("graphql-url")
                .long("graphql-url")
                .value_name("URL")
                .global(true)
                .help("Hotel GraphQL endpoint (or set STOREFRONT_GRAPHQL_URL)"),
        )
        .arg(
            Arg::new("ai-url")
                .long("ai-url")
                .value_name("URL")
                .global(true)
                .help("AI service base URL (or set STOREFRONT_AI_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .help("Request timeout in seconds (or set STOREFRONT_TIMEOUT_SECS)"),
        )
        .subcommand(
            stay_args(Command::new("search").about("Search hotels"))
                .arg(Arg::new("keyword").short('k').long("keyword").value_name("TEXT"))
                .arg(Arg::new("location").short('l').long("location").value_name("CITY"))
                .arg(
                    Arg::new("pages")
                        .short('p')
                        .long("pages")
                        .value_name("COUNT")
                        .help("Number of pages to load")
                        .default_value("1"),
                ),
        )
        .subcommand(stay_args(
            Command::new("hotel")
                .about("Show one hotel")
                .arg(Arg::new("id").required(true).index(1)),
        ))
        .subcommand(stay_args(
            Command::new("book")
                .about("Book a stay")
                .arg(Arg::new("id").required(true).index(1)),
        ))
        .subcommand(
            Command::new("dashboard")
                .about("Supplier hotel management")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List hotels").arg(
                    Arg::new("pages")
                        .short('p')
                        .long("pages")
                        .value_name("COUNT")
                        .default_value("1"),
                ))
                .subcommand(hotel_form_args(Command::new("create").about("Create a hotel")))
                .subcommand(hotel_form_args(
                    Command::new("update")
                        .about("Update a hotel")
                        .arg(Arg::new("id").required(true).index(1)),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete a hotel")
                        .arg(Arg::new("id").required(true).index(1))
                        .arg(
                            Arg::new("yes")
                                .short('y')
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm the deletion"),
                        ),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Generate and refine an itinerary")
                .arg(
                    Arg::new("destination")
                        .short('d')
                        .long("destination")
                        .value_name("CITY")
                        .required(true),
                )
                .arg(
                    Arg::new("days")
                        .short('n')
                        .long("days")
                        .value_name("DAYS")
                        .default_value("3"),
                )
                .arg(
                    Arg::new("style")
                        .short('s')
                        .long("style")
                        .value_name("STYLE")
                        .default_value("Balanced")
                        .help("Balanced, Relaxation, Adventure, Luxury, Budget, Family, Culture or Nightlife"),
                ),
        )
        .get_matches();

    let storefront = Storefront::new(config_from(&matches)?)?;

    let result = match matches.subcommand() {
        Some(("search", sub)) => search(&storefront, sub).await,
        Some(("hotel", sub)) => hotel(&storefront, sub).await,
        Some(("book", sub)) => book(&storefront, sub).await,
        Some(("dashboard", sub)) => dashboard(&storefront, sub).await,
        Some(("plan", sub)) => plan(&storefront, sub).await,
        _ => Err(anyhow!("unknown command")),
    };

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}

fn stay_args(command: Command) -> Command {
    command
        .arg(Arg::new("check-in").long("check-in").value_name("DATE"))
        .arg(Arg::new("check-out").long("check-out").value_name("DATE"))
        .arg(Arg::new("guests").short('g').long("guests").value_name("COUNT"))
}

fn hotel_form_args(command: Command) -> Command {
    command
        .arg(Arg::new("name").long("name").value_name("NAME"))
        .arg(Arg::new("location").long("location").value_name("CITY"))
        .arg(Arg::new("rating").long("rating").value_name("1-5"))
        .arg(Arg::new("price").long("price").value_name("AMOUNT"))
        .arg(Arg::new("image-url").long("image-url").value_name("URL"))
        .arg(Arg::new("description").long("description").value_name("TEXT"))
}

fn config_from(matches: &ArgMatches) -> anyhow::Result<StorefrontConfig> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(url) = matches.get_one::<String>("graphql-url") {
        config = config.with_graphql_url(url);
    }
    if let Some(url) = matches.get_one::<String>("ai-url") {
        config = config.with_ai_base_url(url);
    }
    if let Some(raw) = matches.get_one::<String>("timeout") {
        let seconds: u64 = raw.parse().context("--timeout must be a whole number")?;
        config = config.with_timeout(Some(Duration::from_secs(seconds)));
    }
    info!("GraphQL endpoint: {}", config.graphql_url);
    Ok(config)
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches.get_one::<String>(name).map(String::as_str)
}

fn count(matches: &ArgMatches, name: &str) -> anyhow::Result<u32> {
    let raw = arg(matches, name).unwrap_or("1");
    raw.parse()
        .with_context(|| format!("--{} must be a whole number", name))
}

/// Query string carrying the stay options, as a link from search would.
fn stay_query(matches: &ArgMatches) -> QueryParams {
    let mut query = QueryParams::new();
    for (flag, key) in [("check-in", "checkIn"), ("check-out", "checkOut"), ("guests", "guests")] {
        if let Some(value) = arg(matches, flag) {
            query.set(key, value);
        }
    }
    query
}

async fn search(storefront: &Storefront, matches: &ArgMatches) -> anyhow::Result<()> {
    let filters = SearchFilters::from_query(&stay_query(matches));
    let filters = SearchFilters {
        keyword: arg(matches, "keyword").unwrap_or_default().to_string(),
        location: arg(matches, "location").unwrap_or_default().to_string(),
        ..filters
    };
    let route = Route::with_query(SEARCH_PATH, filters.to_query());
    info!("Searching {}", route);

    let mut page = storefront.search_page(route);
    page.load().await;
    for _ in 1..count(matches, "pages")? {
        if page.load_more().await.is_none() {
            break;
        }
    }
    print!("{}", page.render());
    match page.error() {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

async fn hotel(storefront: &Storefront, matches: &ArgMatches) -> anyhow::Result<()> {
    let id = arg(matches, "id").unwrap_or_default();
    let route = Route::with_query(format!("/hotel/{}", id), stay_query(matches));
    let mut page = storefront.hotel_detail(&route, None);
    page.load().await?;
    print!("{}", page.render());
    if let Ok(handoff) = page.proceed() {
        println!("\nBook: {}", handoff.route);
    }
    Ok(())
}

async fn book(storefront: &Storefront, matches: &ArgMatches) -> anyhow::Result<()> {
    let id = arg(matches, "id").unwrap_or_default();
    let route = Route::with_query(format!("/booking/{}", id), stay_query(matches));
    let mut page = storefront.booking_page(&route, None);
    if page.load().await?.is_none() {
        bail!("Hotel not found.");
    }
    page.confirm().await?;
    for line in page.confirmation_lines().unwrap_or_default() {
        println!("{}", line);
    }
    Ok(())
}

async fn dashboard(storefront: &Storefront, matches: &ArgMatches) -> anyhow::Result<()> {
    let mut board = storefront.dashboard()?;
    match matches.subcommand() {
        Some(("list", sub)) => {
            board.load().await;
            for _ in 1..count(sub, "pages")? {
                if board.load_more().await.is_none() {
                    break;
                }
            }
        }
        Some(("create", sub)) => {
            fill_form(board.create_form_mut(), sub)?;
            let outcome = board.submit_create().await;
            print_banners(&board);
            outcome?;
        }
        Some(("update", sub)) => {
            let id = arg(sub, "id").unwrap_or_default();
            let current = storefront
                .hotel_api()
                .hotel(id)
                .await?
                .ok_or_else(|| anyhow!("Hotel not found."))?;
            board.open_edit_with(&current);
            if let Some(form) = board.edit_form_mut() {
                fill_form(form, sub)?;
            }
            let outcome = board.submit_edit().await;
            print_banners(&board);
            outcome?;
        }
        Some(("delete", sub)) => {
            let id = arg(sub, "id").unwrap_or_default();
            let confirmed = sub.get_flag("yes");
            if !confirmed {
                println!("Pass --yes to delete hotel {}.", id);
                return Ok(());
            }
            let outcome = board.delete(id, confirmed).await;
            print_banners(&board);
            outcome?;
        }
        _ => bail!("unknown dashboard command"),
    }
    print!("{}", board.render());
    Ok(())
}

fn fill_form(form: &mut HotelForm, matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(name) = arg(matches, "name") {
        form.name = name.to_string();
    }
    if let Some(location) = arg(matches, "location") {
        form.location = location.to_string();
    }
    if let Some(rating) = arg(matches, "rating") {
        form.rating = rating.parse().context("--rating must be a number")?;
    }
    if let Some(price) = arg(matches, "price") {
        form.price = price.parse().context("--price must be a whole number")?;
    }
    if let Some(url) = arg(matches, "image-url") {
        form.image_url = Some(url.to_string());
    }
    if let Some(description) = arg(matches, "description") {
        form.description = Some(description.to_string());
    }
    Ok(())
}

fn print_banners(board: &SupplierDashboard) {
    for banner in board.banners() {
        println!("{}", banner);
    }
}

async fn plan(storefront: &Storefront, matches: &ArgMatches) -> anyhow::Result<()> {
    let mut planner = storefront.planner();
    {
        let form = planner.form_mut();
        form.destination = arg(matches, "destination").unwrap_or_default().to_string();
        form.days = arg(matches, "days")
            .unwrap_or("3")
            .parse()
            .context("--days must be a whole number")?;
        form.style = arg(matches, "style")
            .unwrap_or("Balanced")
            .parse::<TravelStyle>()
            .map_err(|e| anyhow!(e))?;
    }

    planner.generate().await?;
    println!("\n{}\n", planner.last_reply().unwrap_or_default());
    println!("Refine the plan, or /clear, /copy, /quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/clear" => {
                planner.clear();
                println!("{}", planner.last_reply().unwrap_or_default());
            }
            "/copy" => match planner.last_reply() {
                Some(reply) => println!("{}", reply),
                None => println!("Nothing to copy yet."),
            },
            text => match planner.refine(text).await {
                Ok(()) => println!("\n{}\n", planner.last_reply().unwrap_or_default()),
                Err(e) => error!("Refine failed: {}", e),
            },
        }
    }
    Ok(())
}
