//! Method table and dispatch into the client
//!
//! Names follow the client's methods. Margin and signed futures methods carry
//! a `margin_` or `futures_` prefix; public futures data methods use the
//! `get_futures_*` form.

use coindcx_rest::{
    CoinDcxClient, FuturesMarginMode, FuturesOrder, FuturesOrderEdit, FuturesOrderQuery,
    FuturesTradeQuery, FuturesTransactionQuery, MarginOrder, MarginOrderQuery, OrderRef, OrderSide,
    PositionFilter, SpotOrder, TradeHistoryQuery, TriggerOrder, WireEnum,
};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::CliError;
use crate::schema::{MethodArgs, MethodSpec, ParamKind, ParamSpec};

use ParamKind::{Bool, Float, Int, List, Str};

const MARGIN: &str = "margin_currency_short_name";
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_SIZE: u32 = 10;

const PAGE: ParamSpec = ParamSpec::with_default("page", Int, "1");
const SIZE: ParamSpec = ParamSpec::with_default("size", Int, "10");
const MARGIN_LIST: ParamSpec = ParamSpec::with_default(MARGIN, List, "USDT");
const MARGIN_ONE: ParamSpec = ParamSpec::with_default(MARGIN, Str, "USDT");
const ID: ParamSpec = ParamSpec::required("id", Str);
const PAIR: ParamSpec = ParamSpec::required("pair", Str);

macro_rules! public {
    ($name:expr, $summary:expr, $params:expr $(,)?) => {
        MethodSpec {
            name: $name,
            summary: $summary,
            authenticated: false,
            params: $params,
        }
    };
}

macro_rules! signed {
    ($name:expr, $summary:expr, $params:expr $(,)?) => {
        MethodSpec {
            name: $name,
            summary: $summary,
            authenticated: true,
            params: $params,
        }
    };
}

/// Every method the CLI can call
pub static METHODS: &[MethodSpec] = &[
    // Market data
    public!("get_ticker", "Ticker for all markets", &[]),
    public!("get_markets", "Active market symbols", &[]),
    public!("get_markets_details", "Details for every market", &[]),
    public!(
        "get_trades",
        "Recent trades for a pair",
        &[PAIR, ParamSpec::with_default("limit", Int, "30")],
    ),
    public!("get_orderbook", "Orderbook for a pair", &[PAIR]),
    public!(
        "get_candles",
        "Candlesticks for a pair",
        &[
            PAIR,
            ParamSpec::required("interval", Str),
            ParamSpec::optional("start_time", Int),
            ParamSpec::optional("end_time", Int),
            ParamSpec::with_default("limit", Int, "500"),
        ],
    ),
    // Spot
    signed!("get_balances", "Account balances", &[]),
    signed!("get_user_info", "Account information", &[]),
    signed!(
        "create_order",
        "Place a spot order",
        &[
            ParamSpec::required("side", Str),
            ParamSpec::required("order_type", Str),
            ParamSpec::required("market", Str),
            ParamSpec::required("total_quantity", Float),
            ParamSpec::optional("price_per_unit", Float),
            ParamSpec::optional("stop_price", Float),
            ParamSpec::optional("client_order_id", Str),
            ParamSpec::optional("ecode", Str),
        ],
    ),
    signed!(
        "get_order_status",
        "Status of one order (by --id or --client_order_id)",
        &[
            ParamSpec::optional("id", Str),
            ParamSpec::optional("client_order_id", Str),
        ],
    ),
    signed!(
        "get_orders_status",
        "Status of several orders",
        &[ParamSpec::required("ids", List)],
    ),
    signed!(
        "get_active_orders",
        "Open orders for a market",
        &[ParamSpec::required("market", Str), ParamSpec::optional("side", Str)],
    ),
    signed!(
        "get_active_orders_count",
        "Number of open orders for a market",
        &[ParamSpec::required("market", Str), ParamSpec::optional("side", Str)],
    ),
    signed!(
        "get_trade_history",
        "Account trade history",
        &[
            ParamSpec::optional("limit", Int),
            ParamSpec::optional("from_id", Int),
            ParamSpec::optional("sort", Str),
            ParamSpec::optional("from_timestamp", Int),
            ParamSpec::optional("to_timestamp", Int),
            ParamSpec::optional("symbol", Str),
        ],
    ),
    signed!(
        "cancel_order",
        "Cancel one order (by --id or --client_order_id)",
        &[
            ParamSpec::optional("id", Str),
            ParamSpec::optional("client_order_id", Str),
        ],
    ),
    signed!(
        "cancel_all_orders",
        "Cancel every open order in a market",
        &[ParamSpec::required("market", Str), ParamSpec::optional("side", Str)],
    ),
    signed!(
        "cancel_orders_by_ids",
        "Cancel several orders",
        &[ParamSpec::required("ids", List)],
    ),
    signed!(
        "edit_order_price",
        "Change the price of an open order",
        &[ID, ParamSpec::required("price_per_unit", Float)],
    ),
    // Margin
    signed!(
        "margin_create_order",
        "Place a margin order",
        &[
            ParamSpec::required("side", Str),
            ParamSpec::required("order_type", Str),
            ParamSpec::required("market", Str),
            ParamSpec::required("quantity", Float),
            ParamSpec::optional("price", Float),
            ParamSpec::optional("stop_price", Float),
            ParamSpec::optional("ecode", Str),
            ParamSpec::optional("leverage", Float),
            ParamSpec::optional("target_price", Float),
            ParamSpec::optional("sl_price", Float),
            ParamSpec::optional("trailing_sl", Bool),
            ParamSpec::optional("client_order_id", Str),
        ],
    ),
    signed!("margin_cancel_order", "Cancel a margin order", &[ID]),
    signed!("margin_exit_order", "Exit a margin order", &[ID]),
    signed!(
        "margin_edit_target",
        "Change the target price",
        &[ID, ParamSpec::required("target_price", Float)],
    ),
    signed!(
        "margin_edit_stop_loss",
        "Change the stop-loss price",
        &[ID, ParamSpec::required("sl_price", Float)],
    ),
    signed!(
        "margin_edit_trailing_stop_loss",
        "Change the trailing stop-loss price",
        &[ID, ParamSpec::required("sl_price", Float)],
    ),
    signed!(
        "margin_add_margin",
        "Add margin to an order",
        &[ID, ParamSpec::required("amount", Float)],
    ),
    signed!(
        "margin_remove_margin",
        "Remove margin from an order",
        &[ID, ParamSpec::required("amount", Float)],
    ),
    signed!(
        "margin_get_orders",
        "List margin orders",
        &[
            ParamSpec::optional("market", Str),
            ParamSpec::optional("details", Bool),
            ParamSpec::optional("status", List),
            ParamSpec::optional("page", Int),
            ParamSpec::optional("size", Int),
            ParamSpec::optional("sort", Str),
        ],
    ),
    signed!("margin_get_order", "One margin order", &[ID]),
    // Futures market data
    public!(
        "get_active_instruments",
        "Active futures instruments",
        &[MARGIN_LIST],
    ),
    public!(
        "get_instrument_details",
        "Details for one futures instrument",
        &[PAIR, MARGIN_ONE],
    ),
    public!("get_futures_trades", "Recent futures trades", &[PAIR]),
    public!(
        "get_futures_orderbook",
        "Futures orderbook",
        &[PAIR, ParamSpec::with_default("depth", Str, "50")],
    ),
    public!(
        "get_futures_candles",
        "Futures candlesticks",
        &[
            PAIR,
            ParamSpec::required("from_time", Int),
            ParamSpec::required("to_time", Int),
            ParamSpec::required("resolution", Str),
        ],
    ),
    // Futures orders and positions
    signed!(
        "futures_list_orders",
        "List futures orders",
        &[
            ParamSpec::optional("status", List),
            ParamSpec::optional("side", Str),
            PAGE,
            SIZE,
            MARGIN_LIST,
        ],
    ),
    signed!(
        "futures_create_order",
        "Place a futures order",
        &[
            ParamSpec::required("side", Str),
            PAIR,
            ParamSpec::required("order_type", Str),
            ParamSpec::required("total_quantity", Float),
            ParamSpec::optional("price", Float),
            ParamSpec::optional("stop_price", Float),
            ParamSpec::optional("leverage", Int),
            ParamSpec::optional("notification", Str),
            ParamSpec::optional("time_in_force", Str),
            ParamSpec::optional("hidden", Bool),
            ParamSpec::optional("post_only", Bool),
            MARGIN_ONE,
            ParamSpec::optional("position_margin_type", Str),
            ParamSpec::optional("take_profit_price", Float),
            ParamSpec::optional("stop_loss_price", Float),
            ParamSpec::optional("client_order_id", Str),
        ],
    ),
    signed!("futures_cancel_order", "Cancel a futures order", &[ID]),
    signed!(
        "futures_edit_order",
        "Edit an open futures order",
        &[
            ID,
            ParamSpec::required("total_quantity", Float),
            ParamSpec::required("price", Float),
            ParamSpec::optional("take_profit_price", Float),
            ParamSpec::optional("stop_loss_price", Float),
        ],
    ),
    signed!(
        "futures_list_positions",
        "List futures positions",
        &[PAGE, SIZE, MARGIN_LIST],
    ),
    signed!(
        "futures_get_positions_by_filters",
        "Positions filtered by pair or id",
        &[
            ParamSpec::optional("pairs", List),
            ParamSpec::optional("position_ids", List),
            PAGE,
            SIZE,
            MARGIN_LIST,
        ],
    ),
    signed!(
        "futures_update_leverage",
        "Change leverage for a pair",
        &[PAIR, ParamSpec::required("leverage", Int), MARGIN_ONE],
    ),
    signed!(
        "futures_add_margin",
        "Add margin to a position",
        &[ID, ParamSpec::required("amount", Float)],
    ),
    signed!(
        "futures_remove_margin",
        "Remove margin from a position",
        &[ID, ParamSpec::required("amount", Float)],
    ),
    signed!(
        "futures_cancel_all_open_orders",
        "Cancel every open futures order",
        &[MARGIN_LIST],
    ),
    signed!(
        "futures_cancel_all_open_orders_for_position",
        "Cancel open orders for one position",
        &[ID],
    ),
    signed!("futures_exit_position", "Close a position", &[ID]),
    signed!(
        "futures_create_tpsl",
        "Attach take-profit and/or stop-loss to a position",
        &[
            ID,
            ParamSpec::optional("take_profit_price", Float),
            ParamSpec::optional("take_profit_limit_price", Float),
            ParamSpec::optional("stop_loss_price", Float),
            ParamSpec::optional("stop_loss_limit_price", Float),
        ],
    ),
    signed!(
        "futures_get_transactions",
        "Position transactions",
        &[
            ParamSpec::optional("position_ids", List),
            ParamSpec::with_default("stage", Str, "all"),
            PAGE,
            SIZE,
            MARGIN_LIST,
        ],
    ),
    signed!(
        "futures_get_trade_history",
        "Futures trade history",
        &[
            ParamSpec::optional("pair", Str),
            ParamSpec::optional("order_id", Str),
            ParamSpec::optional("from_date", Str),
            ParamSpec::optional("to_date", Str),
            PAGE,
            SIZE,
            MARGIN_LIST,
        ],
    ),
    signed!(
        "futures_change_margin_type",
        "Switch a pair between isolated and crossed margin",
        &[PAIR, ParamSpec::required("margin_type", Str)],
    ),
];

/// Look up a method by name
pub fn find(name: &str) -> Option<&'static MethodSpec> {
    METHODS.iter().find(|m| m.name == name)
}

/// Human-readable listing of every method
pub fn render_method_list() -> String {
    let mut out = String::from("Available methods:\n");
    for method in METHODS {
        let auth = if method.authenticated { " (auth)" } else { "" };
        out.push_str(&format!("\n  {}{}\n      {}\n", method.name, auth, method.summary));
        if !method.params.is_empty() {
            let params: Vec<String> = method.params.iter().map(|p| p.usage_fragment()).collect();
            out.push_str(&format!("      {}\n", params.join(" ")));
        }
    }
    out
}

fn side(args: &MethodArgs) -> Result<Option<OrderSide>, CliError> {
    Ok(args.str("side").map(OrderSide::from_wire).transpose()?)
}

fn margins(args: &MethodArgs) -> Result<Vec<FuturesMarginMode>, CliError> {
    Ok(args
        .list(MARGIN)
        .iter()
        .map(|m| FuturesMarginMode::from_wire(m))
        .collect::<Result<_, _>>()?)
}

fn page(args: &MethodArgs) -> Result<(u32, u32), CliError> {
    Ok((
        args.unsigned("page")?.unwrap_or(DEFAULT_PAGE),
        args.unsigned("size")?.unwrap_or(DEFAULT_SIZE),
    ))
}

fn order_ref(args: &MethodArgs) -> Result<OrderRef, CliError> {
    match (args.str("id"), args.str("client_order_id")) {
        (Some(id), _) => Ok(OrderRef::id(id)),
        (None, Some(client_id)) => Ok(OrderRef::client_order_id(client_id)),
        (None, None) => Err(CliError::usage("Either --id or --client_order_id is required")),
    }
}

fn spot_order(args: &MethodArgs) -> Result<SpotOrder, CliError> {
    let mut order = SpotOrder::new(
        args.require_str("side")?,
        args.require_str("order_type")?,
        args.require_str("market")?,
        args.require_decimal("total_quantity")?,
    )?;
    if let Some(price) = args.decimal("price_per_unit") {
        order = order.with_price(price);
    }
    if let Some(stop) = args.decimal("stop_price") {
        order = order.with_stop_price(stop);
    }
    if let Some(id) = args.str("client_order_id") {
        order = order.with_client_order_id(id);
    }
    if let Some(ecode) = args.str("ecode") {
        order = order.with_ecode(ecode)?;
    }
    Ok(order)
}

fn margin_order(args: &MethodArgs) -> Result<MarginOrder, CliError> {
    let mut order = MarginOrder::new(
        args.require_str("side")?,
        args.require_str("order_type")?,
        args.require_str("market")?,
        args.require_decimal("quantity")?,
    )?;
    if let Some(price) = args.decimal("price") {
        order = order.with_price(price);
    }
    if let Some(stop) = args.decimal("stop_price") {
        order = order.with_stop_price(stop);
    }
    if let Some(ecode) = args.str("ecode") {
        order = order.with_ecode(ecode)?;
    }
    if let Some(leverage) = args.decimal("leverage") {
        order = order.with_leverage(leverage);
    }
    if let Some(target) = args.decimal("target_price") {
        order = order.with_target_price(target);
    }
    if let Some(sl) = args.decimal("sl_price") {
        order = order.with_sl_price(sl);
    }
    if let Some(trailing) = args.bool("trailing_sl") {
        order = order.with_trailing_sl(trailing);
    }
    if let Some(id) = args.str("client_order_id") {
        order = order.with_client_order_id(id);
    }
    Ok(order)
}

fn margin_query(args: &MethodArgs) -> Result<MarginOrderQuery, CliError> {
    let mut query = MarginOrderQuery::new();
    if let Some(market) = args.str("market") {
        query = query.with_market(market);
    }
    if let Some(details) = args.bool("details") {
        query = query.with_details(details);
    }
    for status in args.list("status") {
        query = query.with_status(status.as_str())?;
    }
    query.page = args.unsigned("page")?;
    query.size = args.unsigned("size")?;
    if let Some(sort) = args.str("sort") {
        query = query.with_sort(sort);
    }
    Ok(query)
}

fn futures_order(args: &MethodArgs) -> Result<FuturesOrder, CliError> {
    let mut order = FuturesOrder::new(
        args.require_str("side")?,
        args.require_str("order_type")?,
        args.require_str("pair")?,
        args.require_decimal("total_quantity")?,
    )?
    .with_margin_currency(args.require_str(MARGIN)?)?;
    if let Some(price) = args.decimal("price") {
        order = order.with_price(price);
    }
    if let Some(stop) = args.decimal("stop_price") {
        order = order.with_stop_price(stop);
    }
    if let Some(leverage) = args.unsigned("leverage")? {
        order = order.with_leverage(leverage);
    }
    if let Some(notification) = args.str("notification") {
        order = order.with_notification(notification)?;
    }
    if let Some(tif) = args.str("time_in_force") {
        order = order.with_time_in_force(tif)?;
    }
    if let Some(hidden) = args.bool("hidden") {
        order = order.with_hidden(hidden);
    }
    if let Some(post_only) = args.bool("post_only") {
        order = order.with_post_only(post_only);
    }
    if let Some(kind) = args.str("position_margin_type") {
        order = order.with_position_margin_type(kind)?;
    }
    if let Some(tp) = args.decimal("take_profit_price") {
        order = order.with_take_profit(tp);
    }
    if let Some(sl) = args.decimal("stop_loss_price") {
        order = order.with_stop_loss(sl);
    }
    if let Some(id) = args.str("client_order_id") {
        order = order.with_client_order_id(id);
    }
    Ok(order)
}

fn futures_order_query(args: &MethodArgs) -> Result<FuturesOrderQuery, CliError> {
    let (page, size) = page(args)?;
    let mut query = FuturesOrderQuery::new().with_page(page, size);
    for status in args.list("status") {
        query = query.with_status(status.as_str())?;
    }
    if let Some(side) = args.str("side") {
        query = query.with_side(side)?;
    }
    query.margin_currencies = margins(args)?;
    Ok(query)
}

fn position_filter(args: &MethodArgs) -> Result<PositionFilter, CliError> {
    let (page, size) = page(args)?;
    let mut filter = PositionFilter::new().with_page(page, size);
    for pair in args.list("pairs") {
        filter = filter.with_pair(pair.as_str());
    }
    for id in args.list("position_ids") {
        filter = filter.with_position_id(id.as_str());
    }
    filter.margin_currencies = margins(args)?;
    Ok(filter)
}

fn transaction_query(args: &MethodArgs) -> Result<FuturesTransactionQuery, CliError> {
    let (page, size) = page(args)?;
    let mut query = FuturesTransactionQuery::new().with_page(page, size);
    for id in args.list("position_ids") {
        query = query.with_position_id(id.as_str());
    }
    if let Some(stage) = args.str("stage") {
        query = query.with_stage(stage);
    }
    query.margin_currencies = margins(args)?;
    Ok(query)
}

fn futures_trade_query(args: &MethodArgs) -> Result<FuturesTradeQuery, CliError> {
    let (page, size) = page(args)?;
    let mut query = FuturesTradeQuery::new().with_page(page, size);
    if let Some(pair) = args.str("pair") {
        query = query.with_pair(pair);
    }
    if let Some(id) = args.str("order_id") {
        query = query.with_order_id(id);
    }
    query.from_date = args.str("from_date").map(str::to_string);
    query.to_date = args.str("to_date").map(str::to_string);
    query.margin_currencies = margins(args)?;
    Ok(query)
}

fn trigger(price: Option<Decimal>, limit: Option<Decimal>, take_profit: bool) -> Option<TriggerOrder> {
    let price = price?;
    Some(match (take_profit, limit) {
        (true, Some(limit)) => TriggerOrder::take_profit_limit(price, limit),
        (true, None) => TriggerOrder::take_profit_market(price),
        (false, Some(limit)) => TriggerOrder::stop_limit(price, limit),
        (false, None) => TriggerOrder::stop_market(price),
    })
}

/// Call the client method named by `spec`
///
/// # Errors
/// Client failures pass through as `CliError::Rest`; argument problems the
/// schema cannot express (such as a missing order reference) are usage errors.
pub async fn dispatch(client: &CoinDcxClient, spec: &MethodSpec, args: &MethodArgs) -> Result<Value, CliError> {
    let market = client.market();
    let spot = client.spot();
    let margin = client.margin();
    let futures = client.futures();

    let value = match spec.name {
        // Market data
        "get_ticker" => market.get_ticker().await?,
        "get_markets" => market.get_markets().await?,
        "get_markets_details" => market.get_markets_details().await?,
        "get_trades" => {
            market
                .get_trades(args.require_str("pair")?, args.unsigned("limit")?)
                .await?
        }
        "get_orderbook" => market.get_orderbook(args.require_str("pair")?).await?,
        "get_candles" => {
            market
                .get_candles(
                    args.require_str("pair")?,
                    args.require_str("interval")?,
                    args.unsigned("start_time")?,
                    args.unsigned("end_time")?,
                    args.unsigned("limit")?,
                )
                .await?
        }

        // Spot
        "get_balances" => spot.get_balances().await?,
        "get_user_info" => spot.get_user_info().await?,
        "create_order" => spot.create_order(&spot_order(args)?).await?,
        "get_order_status" => spot.get_order_status(&order_ref(args)?).await?,
        "get_orders_status" => spot.get_orders_status(args.list("ids").to_vec()).await?,
        "get_active_orders" => {
            spot.get_active_orders(args.require_str("market")?, side(args)?)
                .await?
        }
        "get_active_orders_count" => {
            spot.get_active_orders_count(args.require_str("market")?, side(args)?)
                .await?
        }
        "get_trade_history" => {
            let query = TradeHistoryQuery {
                limit: args.unsigned("limit")?,
                from_id: args.unsigned("from_id")?,
                sort: args.str("sort").map(str::to_string),
                from_timestamp: args.unsigned("from_timestamp")?,
                to_timestamp: args.unsigned("to_timestamp")?,
                symbol: args.str("symbol").map(str::to_string),
            };
            spot.get_trade_history(&query).await?
        }
        "cancel_order" => spot.cancel_order(&order_ref(args)?).await?,
        "cancel_all_orders" => {
            spot.cancel_all_orders(args.require_str("market")?, side(args)?)
                .await?
        }
        "cancel_orders_by_ids" => spot.cancel_orders_by_ids(args.list("ids").to_vec()).await?,
        "edit_order_price" => {
            spot.edit_order_price(args.require_str("id")?, args.require_decimal("price_per_unit")?)
                .await?
        }

        // Margin
        "margin_create_order" => margin.create_order(&margin_order(args)?).await?,
        "margin_cancel_order" => margin.cancel_order(args.require_str("id")?).await?,
        "margin_exit_order" => margin.exit_order(args.require_str("id")?).await?,
        "margin_edit_target" => {
            margin
                .edit_target(args.require_str("id")?, args.require_decimal("target_price")?)
                .await?
        }
        "margin_edit_stop_loss" => {
            margin
                .edit_stop_loss(args.require_str("id")?, args.require_decimal("sl_price")?)
                .await?
        }
        "margin_edit_trailing_stop_loss" => {
            margin
                .edit_trailing_stop_loss(args.require_str("id")?, args.require_decimal("sl_price")?)
                .await?
        }
        "margin_add_margin" => {
            margin
                .add_margin(args.require_str("id")?, args.require_decimal("amount")?)
                .await?
        }
        "margin_remove_margin" => {
            margin
                .remove_margin(args.require_str("id")?, args.require_decimal("amount")?)
                .await?
        }
        "margin_get_orders" => margin.get_orders(&margin_query(args)?).await?,
        "margin_get_order" => margin.get_order(args.require_str("id")?).await?,

        // Futures market data
        "get_active_instruments" => futures.get_active_instruments(&margins(args)?).await?,
        "get_instrument_details" => {
            futures
                .get_instrument_details(args.require_str("pair")?, args.require_str(MARGIN)?)
                .await?
        }
        "get_futures_trades" => futures.get_trades(args.require_str("pair")?).await?,
        "get_futures_orderbook" => {
            futures
                .get_orderbook(args.require_str("pair")?, args.require_str("depth")?)
                .await?
        }
        "get_futures_candles" => {
            futures
                .get_candles(
                    args.require_str("pair")?,
                    args.require_unsigned("from_time")?,
                    args.require_unsigned("to_time")?,
                    args.require_str("resolution")?,
                )
                .await?
        }

        // Futures orders and positions
        "futures_list_orders" => futures.list_orders(&futures_order_query(args)?).await?,
        "futures_create_order" => futures.create_order(&futures_order(args)?).await?,
        "futures_cancel_order" => futures.cancel_order(args.require_str("id")?).await?,
        "futures_edit_order" => {
            let mut edit = FuturesOrderEdit::new(
                args.require_str("id")?,
                args.require_decimal("total_quantity")?,
                args.require_decimal("price")?,
            );
            if let Some(tp) = args.decimal("take_profit_price") {
                edit = edit.with_take_profit(tp);
            }
            if let Some(sl) = args.decimal("stop_loss_price") {
                edit = edit.with_stop_loss(sl);
            }
            futures.edit_order(&edit).await?
        }
        "futures_list_positions" => {
            let (page, size) = page(args)?;
            futures.list_positions(page, size, &margins(args)?).await?
        }
        "futures_get_positions_by_filters" => {
            futures
                .get_positions_by_filters(&position_filter(args)?)
                .await?
        }
        "futures_update_leverage" => {
            futures
                .update_leverage(
                    args.require_str("pair")?,
                    args.require_unsigned("leverage")?,
                    args.require_str(MARGIN)?,
                )
                .await?
        }
        "futures_add_margin" => {
            futures
                .add_margin(args.require_str("id")?, args.require_decimal("amount")?)
                .await?
        }
        "futures_remove_margin" => {
            futures
                .remove_margin(args.require_str("id")?, args.require_decimal("amount")?)
                .await?
        }
        "futures_cancel_all_open_orders" => futures.cancel_all_open_orders(&margins(args)?).await?,
        "futures_cancel_all_open_orders_for_position" => {
            futures
                .cancel_all_open_orders_for_position(args.require_str("id")?)
                .await?
        }
        "futures_exit_position" => futures.exit_position(args.require_str("id")?).await?,
        "futures_create_tpsl" => {
            let take_profit = trigger(
                args.decimal("take_profit_price"),
                args.decimal("take_profit_limit_price"),
                true,
            );
            let stop_loss = trigger(
                args.decimal("stop_loss_price"),
                args.decimal("stop_loss_limit_price"),
                false,
            );
            futures
                .create_tpsl(args.require_str("id")?, take_profit.as_ref(), stop_loss.as_ref())
                .await?
        }
        "futures_get_transactions" => futures.get_transactions(&transaction_query(args)?).await?,
        "futures_get_trade_history" => {
            futures
                .get_trade_history(&futures_trade_query(args)?)
                .await?
        }
        "futures_change_margin_type" => {
            futures
                .change_margin_type(args.require_str("pair")?, args.require_str("margin_type")?)
                .await?
        }

        other => return Err(CliError::usage(format!("Unknown method: {other}"))),
    };

    Ok(value)
}
