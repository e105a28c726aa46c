//! CLI for browsing, posting and claiming shared coupons.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use coupon_share::error::CouponError;
use coupon_share::models::{
    Coupon, CouponId, CouponStats, CouponStatus, CouponUpdate, DateTime, DiscountType, NewCoupon,
    Utc, timestamp,
};
use coupon_share::query::{CouponQuery, SortBy, StatusFilter};
use coupon_share::storage::{BlockingStorage, FileStorage};
use coupon_share::store::CouponStoreBlocking;
use coupon_share::validation::validate_rating;
use owo_colors::OwoColorize;

/// Environment variable overriding the storage directory.
const DATA_DIR_ENV: &str = "COUPONS_DATA_DIR";
/// Environment variable naming the acting user.
const USER_ENV: &str = "COUPONS_USER";
/// Identity used when no user is configured.
const DEFAULT_USER: &str = "Guest User";
/// Placeholder for empty table cells.
const EMPTY_CELL: &str = "\u{2014}";

/// Coupon sharing CLI: post, browse, claim and rate community coupons.
#[derive(Debug, Parser)]
#[command(name = "coupons", version, about)]
struct Cli {
    /// Override the storage directory (default: $COUPONS_DATA_DIR, then
    /// the XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Act as this user (default: $COUPONS_USER, then "Guest User").
    #[arg(long, global = true, value_name = "NAME")]
    user: Option<String>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List coupons, optionally filtered and sorted.
    List(ListArgs),
    /// Show every field of one coupon.
    Show {
        /// Coupon ID.
        id: String,
    },
    /// Post a new coupon.
    Post(PostArgs),
    /// Claim an available coupon.
    Claim {
        /// Coupon ID.
        id: String,
    },
    /// Release a coupon you claimed.
    Unclaim {
        /// Coupon ID.
        id: String,
    },
    /// Rate a coupon from 1 to 5.
    Rate {
        /// Coupon ID.
        id: String,
        /// Star rating.
        rating: u8,
    },
    /// Edit a coupon you posted.
    Edit(EditArgs),
    /// Delete a coupon you posted.
    Delete {
        /// Coupon ID.
        id: String,
    },
    /// Mark coupons past their expiry date as expired.
    Sweep,
    /// Show status and category counts.
    Stats,
    /// List coupons you posted, or claimed with --claimed.
    Mine {
        /// Show claimed coupons instead of posted ones.
        #[arg(long)]
        claimed: bool,
    },
}

/// Arguments for the `list` subcommand.
#[derive(Debug, Default, Args)]
struct ListArgs {
    /// Status to show: available, claimed, expired or all.
    #[arg(long, default_value = "available")]
    status: StatusFilter,
    /// Case-insensitive text to find in title, store or description.
    #[arg(long)]
    search: Option<String>,
    /// Exact category name, or "all".
    #[arg(long)]
    category: Option<String>,
    /// Store name substring (case-insensitive), or "all".
    #[arg(long)]
    store: Option<String>,
    /// Minimum numeric discount.
    #[arg(long)]
    min_discount: Option<f64>,
    /// Maximum numeric discount.
    #[arg(long)]
    max_discount: Option<f64>,
    /// Sort order: newest, expiry, discount or rating.
    #[arg(long, default_value = "newest")]
    sort: String,
}

/// Arguments for the `post` subcommand.
#[derive(Debug, Args)]
struct PostArgs {
    /// Short headline.
    #[arg(long)]
    title: String,
    /// Store or brand.
    #[arg(long)]
    store: String,
    /// Category name.
    #[arg(long)]
    category: String,
    /// Discount amount, e.g. "20" or "BOGO".
    #[arg(long)]
    discount: String,
    /// How to read the discount: percentage, fixed or other.
    #[arg(long, default_value = "percentage")]
    discount_type: DiscountType,
    /// Expiry date (YYYY-MM-DD or RFC 3339).
    #[arg(long, value_parser = parse_expiry)]
    expires: DateTime<Utc>,
    /// Free-text details.
    #[arg(long)]
    description: String,
    /// Redemption code.
    #[arg(long)]
    code: Option<String>,
    /// Picture URL.
    #[arg(long)]
    image_url: Option<String>,
}

/// Arguments for the `edit` subcommand.
#[derive(Debug, Default, Args)]
struct EditArgs {
    /// Coupon ID.
    id: String,
    /// New headline.
    #[arg(long)]
    title: Option<String>,
    /// New store name.
    #[arg(long)]
    store: Option<String>,
    /// New category.
    #[arg(long)]
    category: Option<String>,
    /// New discount amount.
    #[arg(long)]
    discount: Option<String>,
    /// New discount type.
    #[arg(long)]
    discount_type: Option<DiscountType>,
    /// New expiry date (YYYY-MM-DD or RFC 3339).
    #[arg(long, value_parser = parse_expiry)]
    expires: Option<DateTime<Utc>>,
    /// New description.
    #[arg(long)]
    description: Option<String>,
    /// New redemption code.
    #[arg(long)]
    code: Option<String>,
    /// New picture URL.
    #[arg(long)]
    image_url: Option<String>,
}

impl ListArgs {
    /// Builds the store query these arguments describe.
    fn to_query(&self) -> CouponQuery {
        CouponQuery {
            status: self.status,
            search: self.search.clone(),
            category: self.category.clone(),
            store: self.store.clone(),
            min_discount: self.min_discount,
            max_discount: self.max_discount,
            sort_by: SortBy::from_param(&self.sort),
        }
    }
}

impl PostArgs {
    /// Builds the submission posted by `user`.
    fn into_submission(self, user: &str) -> NewCoupon {
        NewCoupon {
            title: self.title,
            store: self.store,
            category: self.category,
            discount_value: self.discount,
            discount_type: self.discount_type,
            expiry_date: self.expires,
            description: self.description,
            code: self.code,
            image_url: self.image_url,
            posted_by: user.to_owned(),
        }
    }
}

impl EditArgs {
    /// Splits the arguments into the target ID and the patch.
    fn into_patch(self) -> (CouponId, CouponUpdate) {
        let patch = CouponUpdate {
            title: self.title,
            store: self.store,
            category: self.category,
            description: self.description,
            discount_value: self.discount,
            discount_type: self.discount_type,
            expiry_date: self.expires,
            code: self.code,
            image_url: self.image_url,
        };
        (CouponId::new(self.id), patch)
    }
}

/// Parses an expiry date for clap.
fn parse_expiry(raw: &str) -> Result<DateTime<Utc>, String> {
    timestamp::parse(raw)
        .ok_or_else(|| format!("invalid date `{raw}` (expected YYYY-MM-DD or RFC 3339)"))
}

/// Reads a non-empty environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Picks the acting user: the flag, then the environment, then the
/// default identity.
fn resolve_user(flag: Option<String>, env: Option<String>) -> String {
    flag.or(env)
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_USER.to_owned())
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    let user = resolve_user(cli.user, env_value(USER_ENV));

    let storage = match create_storage(cli.data_dir) {
        Ok(storage) => storage,
        Err(err) => return fail(format_args!("failed to initialize storage: {err}")),
    };
    let store = CouponStoreBlocking::new(storage);

    dispatch(&store, &user, cli.command)
}

/// Creates the storage backend, using `data_dir` if provided, then
/// `$COUPONS_DATA_DIR`, then the default XDG data directory.
fn create_storage(data_dir: Option<PathBuf>) -> coupon_share::error::Result<FileStorage> {
    let dir = match data_dir.or_else(|| env_value(DATA_DIR_ENV).map(PathBuf::from)) {
        Some(dir) => dir,
        None => FileStorage::default_dir()?,
    };
    FileStorage::new(dir)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    user: &str,
    command: Command,
) -> io::Result<ExitCode> {
    match command {
        Command::List(args) => cmd_list(store, &args),
        Command::Show { id } => cmd_show(store, &CouponId::new(id)),
        Command::Post(args) => cmd_post(store, user, args),
        Command::Claim { id } => cmd_claim(store, user, &CouponId::new(id)),
        Command::Unclaim { id } => cmd_unclaim(store, user, &CouponId::new(id)),
        Command::Rate { id, rating } => cmd_rate(store, &CouponId::new(id), rating),
        Command::Edit(args) => cmd_edit(store, user, args),
        Command::Delete { id } => cmd_delete(store, user, &CouponId::new(id)),
        Command::Sweep => cmd_sweep(store),
        Command::Stats => cmd_stats(store),
        Command::Mine { claimed } => cmd_mine(store, user, claimed),
    }
}

// ── Error reporting ──────────────────────────────────────────────────

/// Prints `error: <message>` to stderr and returns a failure exit code.
fn fail<M: core::fmt::Display>(message: M) -> io::Result<ExitCode> {
    writeln!(io::stderr().lock(), "{} {message}", "error:".red().bold())?;
    Ok(ExitCode::FAILURE)
}

/// Reports a store error. Validation failures list each detail on its
/// own line.
fn fail_with(context: &str, err: CouponError) -> io::Result<ExitCode> {
    match err {
        CouponError::Validation(details) => {
            let mut stderr = io::stderr().lock();
            writeln!(stderr, "{} {context}: invalid input", "error:".red().bold())?;
            for detail in details {
                writeln!(stderr, "  {} {detail}", "-".red())?;
            }
            Ok(ExitCode::FAILURE)
        }
        err @ (CouponError::Serialization(_) | CouponError::Storage(_)) => {
            fail(format_args!("{context}: {err}"))
        }
    }
}

/// Loads a coupon, reporting a missing one or a storage failure.
///
/// Returns `Ok(None)` when an error has already been printed.
fn load_coupon<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    id: &CouponId,
) -> io::Result<Option<Coupon>> {
    match store.get(id) {
        Ok(Some(coupon)) => Ok(Some(coupon)),
        Ok(None) => {
            let _code = fail(format_args!("coupon not found: {id}"))?;
            Ok(None)
        }
        Err(err) => {
            let _code = fail_with("failed to read coupons", err)?;
            Ok(None)
        }
    }
}

/// Explains why `user` may not claim `coupon`, if they may not.
fn claim_refusal(coupon: &Coupon, user: &str, now: DateTime<Utc>) -> Option<String> {
    if coupon.can_claim(user, now) {
        return None;
    }
    let reason = if coupon.is_owned_by(user) {
        "you cannot claim your own coupon".to_owned()
    } else if coupon.status == CouponStatus::Available {
        "coupon has expired".to_owned()
    } else {
        format!("coupon is {}", coupon.status)
    };
    Some(reason)
}

// ── Commands ─────────────────────────────────────────────────────────

/// Executes the `list` subcommand.
fn cmd_list<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    args: &ListArgs,
) -> io::Result<ExitCode> {
    match store.query(&args.to_query()) {
        Ok(coupons) => {
            print_coupons_table("Coupons", &coupons)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail_with("failed to read coupons", err),
    }
}

/// Executes the `show` subcommand.
fn cmd_show<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    id: &CouponId,
) -> io::Result<ExitCode> {
    let Some(coupon) = load_coupon(store, id)? else {
        return Ok(ExitCode::FAILURE);
    };
    print_coupon_detail(&coupon)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `post` subcommand.
fn cmd_post<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    user: &str,
    args: PostArgs,
) -> io::Result<ExitCode> {
    match store.publish(args.into_submission(user)) {
        Ok(coupon) => {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Coupon posted:".green().bold(),
                coupon.id
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail_with("could not post coupon", err),
    }
}

/// Executes the `claim` subcommand.
fn cmd_claim<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    user: &str,
    id: &CouponId,
) -> io::Result<ExitCode> {
    let Some(coupon) = load_coupon(store, id)? else {
        return Ok(ExitCode::FAILURE);
    };
    if let Some(reason) = claim_refusal(&coupon, user, Utc::now()) {
        return fail(reason);
    }
    match store.claim(id, user) {
        Ok(true) => {
            let mut out = io::stdout().lock();
            writeln!(out, "{} {}", "Claimed:".green().bold(), coupon.title)?;
            if let Some(code) = coupon.code.as_deref() {
                writeln!(out, "  {} {}", "Code:".bold(), code.yellow())?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(false) => fail("coupon is no longer available"),
        Err(err) => fail_with("could not claim coupon", err),
    }
}

/// Executes the `unclaim` subcommand.
fn cmd_unclaim<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    user: &str,
    id: &CouponId,
) -> io::Result<ExitCode> {
    let Some(coupon) = load_coupon(store, id)? else {
        return Ok(ExitCode::FAILURE);
    };
    if !coupon.can_unclaim(user) {
        return fail("only the user who claimed this coupon can release it");
    }
    match store.unclaim(id) {
        Ok(true) => {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Released:".green().bold(),
                coupon.title
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(false) => fail("coupon is not claimed"),
        Err(err) => fail_with("could not release coupon", err),
    }
}

/// Executes the `rate` subcommand.
fn cmd_rate<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    id: &CouponId,
    rating: u8,
) -> io::Result<ExitCode> {
    let violations = validate_rating(rating);
    if !violations.is_empty() {
        return fail_with("could not rate coupon", CouponError::Validation(violations));
    }
    match store.rate(id, rating) {
        Ok(Some(coupon)) => {
            writeln!(
                io::stdout().lock(),
                "{} {} now rated {:.1} ({} ratings)",
                "Rated:".green().bold(),
                coupon.title,
                coupon.rating,
                coupon.rating_count
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => fail(format_args!("coupon not found: {id}")),
        Err(err) => fail_with("could not rate coupon", err),
    }
}

/// Executes the `edit` subcommand.
fn cmd_edit<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    user: &str,
    args: EditArgs,
) -> io::Result<ExitCode> {
    let (id, patch) = args.into_patch();
    if patch.is_empty() {
        return fail("nothing to change; pass at least one field to edit");
    }
    let Some(coupon) = load_coupon(store, &id)? else {
        return Ok(ExitCode::FAILURE);
    };
    if !coupon.is_owned_by(user) {
        return fail("only the user who posted this coupon can edit it");
    }
    match store.update(&id, patch) {
        Ok(Some(updated)) => {
            print_coupon_detail(&updated)?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => fail(format_args!("coupon not found: {id}")),
        Err(err) => fail_with("could not edit coupon", err),
    }
}

/// Executes the `delete` subcommand.
fn cmd_delete<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    user: &str,
    id: &CouponId,
) -> io::Result<ExitCode> {
    let Some(coupon) = load_coupon(store, id)? else {
        return Ok(ExitCode::FAILURE);
    };
    if !coupon.is_owned_by(user) {
        return fail("only the user who posted this coupon can delete it");
    }
    match store.delete(id) {
        Ok(true) => {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Deleted:".green().bold(),
                coupon.title
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(false) => fail(format_args!("coupon not found: {id}")),
        Err(err) => fail_with("could not delete coupon", err),
    }
}

/// Executes the `sweep` subcommand.
fn cmd_sweep<S: BlockingStorage>(store: &CouponStoreBlocking<S>) -> io::Result<ExitCode> {
    match store.sweep() {
        Ok(expired) => {
            writeln!(
                io::stdout().lock(),
                "{} {}",
                "Sweep complete.".green().bold(),
                format_args!("({expired} coupons expired)").dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail_with("sweep failed", err),
    }
}

/// Executes the `stats` subcommand.
fn cmd_stats<S: BlockingStorage>(store: &CouponStoreBlocking<S>) -> io::Result<ExitCode> {
    match store.stats() {
        Ok(stats) => {
            print_stats(&stats)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail_with("failed to read coupons", err),
    }
}

/// Executes the `mine` subcommand.
fn cmd_mine<S: BlockingStorage>(
    store: &CouponStoreBlocking<S>,
    user: &str,
    claimed: bool,
) -> io::Result<ExitCode> {
    let (heading, result) = if claimed {
        ("Claimed by you", store.claimed_by(user))
    } else {
        ("Posted by you", store.posted_by(user))
    };
    match result {
        Ok(coupons) => {
            print_coupons_table(heading, &coupons)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail_with("failed to read coupons", err),
    }
}

// ── Output formatting ────────────────────────────────────────────────

/// Renders the discount with its unit.
fn discount_label(coupon: &Coupon) -> String {
    match coupon.discount_type {
        DiscountType::Percentage => format!("{}%", coupon.discount_value),
        DiscountType::Fixed => format!("${}", coupon.discount_value),
        DiscountType::Other => coupon.discount_value.clone(),
    }
}

/// Renders the rating, or a dash when unrated.
fn rating_label(coupon: &Coupon) -> String {
    if coupon.rating_count == 0 {
        EMPTY_CELL.to_owned()
    } else {
        format!("{:.1} ({})", coupon.rating, coupon.rating_count)
    }
}

/// Table colour for a status.
const fn status_color(status: CouponStatus) -> Color {
    match status {
        CouponStatus::Available => Color::Green,
        CouponStatus::Claimed => Color::Yellow,
        CouponStatus::Expired => Color::DarkGrey,
    }
}

/// Prints coupons in a table.
fn print_coupons_table(heading: &str, coupons: &[Coupon]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if coupons.is_empty() {
        writeln!(out, "{}", "No coupons found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Store").fg(Color::Cyan),
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Discount").fg(Color::Cyan),
        Cell::new("Expires").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Rating").fg(Color::Cyan),
    ]);

    for coupon in coupons {
        _ = table.add_row(vec![
            Cell::new(&coupon.id).fg(Color::DarkGrey),
            Cell::new(&coupon.title),
            Cell::new(&coupon.store),
            Cell::new(&coupon.category),
            Cell::new(discount_label(coupon)),
            Cell::new(coupon.expiry_date.format("%Y-%m-%d")),
            Cell::new(coupon.status).fg(status_color(coupon.status)),
            Cell::new(rating_label(coupon)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        heading.green().bold(),
        format_args!("({})", coupons.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints every field of one coupon.
fn print_coupon_detail(coupon: &Coupon) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", coupon.title.green().bold())?;
    writeln!(out)?;
    writeln!(out, "  {} {}", "ID:".bold(), coupon.id)?;
    writeln!(out, "  {} {}", "Store:".bold(), coupon.store)?;
    writeln!(out, "  {} {}", "Category:".bold(), coupon.category)?;
    writeln!(out, "  {} {}", "Discount:".bold(), discount_label(coupon))?;
    writeln!(
        out,
        "  {} {}",
        "Expires:".bold(),
        timestamp::format(&coupon.expiry_date)
    )?;
    writeln!(out, "  {} {}", "Status:".bold(), coupon.status)?;
    writeln!(out, "  {} {}", "Rating:".bold(), rating_label(coupon))?;
    writeln!(
        out,
        "  {} {} on {}",
        "Posted by:".bold(),
        coupon.posted_by,
        timestamp::format(&coupon.posted_at)
    )?;
    if let Some(claimant) = coupon.claimed_by.as_deref() {
        let when = coupon
            .claimed_at
            .as_ref()
            .map_or_else(|| EMPTY_CELL.to_owned(), timestamp::format);
        writeln!(out, "  {} {claimant} on {when}", "Claimed by:".bold())?;
    }
    if let Some(code) = coupon.code.as_deref() {
        writeln!(out, "  {} {}", "Code:".bold(), code.yellow())?;
    }
    if let Some(url) = coupon.image_url.as_deref() {
        writeln!(out, "  {} {url}", "Image:".bold())?;
    }
    writeln!(out)?;
    writeln!(out, "  {}", coupon.description)?;
    Ok(())
}

/// Prints status totals and per-category counts.
fn print_stats(stats: &CouponStats) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        "Coupon Stats".green().bold(),
        format_args!("({} total)", stats.total).dimmed()
    )?;
    writeln!(out)?;

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Count").fg(Color::Cyan),
    ]);
    let rows = [
        (CouponStatus::Available, stats.available),
        (CouponStatus::Claimed, stats.claimed),
        (CouponStatus::Expired, stats.expired),
    ];
    for (status, count) in rows {
        _ = table.add_row(vec![
            Cell::new(status).fg(status_color(status)),
            Cell::new(count),
        ]);
    }
    writeln!(out, "{table}")?;

    if stats.category_counts.is_empty() {
        return Ok(());
    }
    let mut categories = Table::new();
    _ = categories.load_preset(UTF8_FULL);
    _ = categories.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Count").fg(Color::Cyan),
    ]);
    for (category, count) in &stats.category_counts {
        _ = categories.add_row(vec![Cell::new(category), Cell::new(count)]);
    }
    writeln!(out)?;
    writeln!(out, "{categories}")?;
    Ok(())
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output; if stderr itself failed, nothing
            // more can be done.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
