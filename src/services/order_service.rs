use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    dto::orders::{OrderList, OrderTotals, OrdersSummary, RecentOrder, StatusBreakdown},
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems, Model as OrderItemModel},
        orders::{Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
        users::{Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::AppResult,
    models::{OrderLine, OrderView, money},
    response::ApiResponse,
    state::AppState,
};

pub const UNKNOWN: &str = "Unknown";
const RECENT_ORDERS: usize = 5;

/// Every order, newest first, with customer and product names resolved.
pub async fn list_orders(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let orders = Orders::find()
        .order_by_desc(OrderCol::OrderDate)
        .order_by_desc(OrderCol::Id)
        .all(state.db())
        .await?;

    if orders.is_empty() {
        return Ok(ApiResponse::success(
            "Orders retrieved successfully",
            OrderList::new(Vec::new()),
        ));
    }

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(order_ids))
        .order_by_asc(OrderItemCol::Id)
        .all(state.db())
        .await?;

    let product_ids: BTreeSet<i32> = items.iter().map(|i| i.product_id).collect();
    let product_names: HashMap<i32, String> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        Products::find()
            .filter(ProdCol::Id.is_in(product_ids))
            .all(state.db())
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect()
    };

    let customers = load_customers(state.db(), orders.iter().map(|o| o.customer_id)).await?;
    let views = assemble_orders(orders, items, &product_names, &customers);

    Ok(ApiResponse::success(
        "Orders retrieved successfully",
        OrderList::new(views),
    ))
}

pub async fn orders_summary(state: &AppState) -> AppResult<ApiResponse<OrdersSummary>> {
    let orders = Orders::find().all(state.db()).await?;

    let recent_customers = most_recent(&orders, RECENT_ORDERS)
        .into_iter()
        .map(|o| o.customer_id);
    let customers = load_customers(state.db(), recent_customers).await?;

    Ok(ApiResponse::success(
        "Orders summary retrieved successfully",
        summarize_orders(&orders, &customers, Utc::now()),
    ))
}

async fn load_customers<C, I>(db: &C, ids: I) -> AppResult<HashMap<i32, UserModel>>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = i32>,
{
    let ids: BTreeSet<i32> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let users: HashMap<i32, UserModel> = Users::find()
        .filter(UserCol::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    Ok(users)
}

/// Join orders with their lines, product names and customers. Missing references become "Unknown".
pub fn assemble_orders(
    orders: Vec<OrderModel>,
    items: Vec<OrderItemModel>,
    product_names: &HashMap<i32, String>,
    customers: &HashMap<i32, UserModel>,
) -> Vec<OrderView> {
    let mut lines_by_order: HashMap<i32, Vec<OrderLine>> = HashMap::new();
    for item in items {
        let product_name = product_names
            .get(&item.product_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());
        lines_by_order.entry(item.order_id).or_default().push(OrderLine {
            product_id: item.product_id,
            product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
        });
    }

    orders
        .into_iter()
        .map(|order| {
            let customer = customers.get(&order.customer_id);
            let items = lines_by_order.remove(&order.id).unwrap_or_default();
            OrderView {
                id: order.id,
                order_number: order.order_number,
                customer_id: order.customer_id,
                customer_name: customer
                    .map(|c| c.username.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                customer_email: customer
                    .map(|c| c.email.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                total_amount: order.total_amount,
                status: order.status,
                order_date: order.order_date.with_timezone(&Utc),
                shipped_date: order.shipped_date.map(|d| d.with_timezone(&Utc)),
                delivered_date: order.delivered_date.map(|d| d.with_timezone(&Utc)),
                shipping_address: order.shipping_address,
                notes: order.notes,
                item_count: items.len(),
                items,
            }
        })
        .collect()
}

/// The `n` newest orders by order date (ties broken by id, newest first).
pub fn most_recent(orders: &[OrderModel], n: usize) -> Vec<&OrderModel> {
    let mut sorted: Vec<&OrderModel> = orders.iter().collect();
    sorted.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));
    sorted.truncate(n);
    sorted
}

/// Counts and revenue for all time, the UTC day of `now` and the UTC month of `now`.
pub fn summarize_orders(
    orders: &[OrderModel],
    customers: &HashMap<i32, UserModel>,
    now: DateTime<Utc>,
) -> OrdersSummary {
    let today = now.date_naive();
    let month_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(now);

    let mut total_revenue = Decimal::ZERO;
    let mut today_orders = 0;
    let mut today_revenue = Decimal::ZERO;
    let mut month_orders = 0;
    let mut month_revenue = Decimal::ZERO;
    let mut by_status: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();

    for order in orders {
        let placed = order.order_date.with_timezone(&Utc);
        total_revenue += order.total_amount;
        if placed.date_naive() == today {
            today_orders += 1;
            today_revenue += order.total_amount;
        }
        if placed >= month_start {
            month_orders += 1;
            month_revenue += order.total_amount;
        }
        let entry = by_status
            .entry(order.status.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += order.total_amount;
    }

    let status_breakdown = by_status
        .into_iter()
        .map(|(status, (count, amount))| StatusBreakdown {
            status: status.to_string(),
            count,
            total_amount: money(amount),
        })
        .collect();

    let recent_orders = most_recent(orders, RECENT_ORDERS)
        .into_iter()
        .map(|order| RecentOrder {
            id: order.id,
            order_number: order.order_number.clone(),
            customer_name: customers
                .get(&order.customer_id)
                .map(|c| c.username.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            total_amount: money(order.total_amount),
            status: order.status.clone(),
            order_date: order.order_date.with_timezone(&Utc),
        })
        .collect();

    OrdersSummary {
        summary: OrderTotals {
            total_orders: orders.len(),
            today_orders,
            this_month_orders: month_orders,
            total_revenue: money(total_revenue),
            today_revenue: money(today_revenue),
            this_month_revenue: money(month_revenue),
        },
        status_breakdown,
        recent_orders,
    }
}
