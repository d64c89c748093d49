use anyhow::{Context, Result};
use futures_util::future::try_join;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::{render, CheckoutArgs, Command, LineSpec, OrdersCommand, PageArgs, PaymentChoice, WalletCommand};
use crate::api::{
    AnalyticsApi, ApiClient, CatalogApi, OrderScope, OrdersApi, PageRequest, PagedList, WalletApi,
};
use crate::domain::cart::{CartCommand, CartProduct, CartVariant};
use crate::domain::catalog::BusinessRef;
use crate::domain::ids::{BusinessId, ProductId};
use crate::domain::order::{CheckoutHandler, CheckoutOutcome, CheckoutRequest, OrderTracker, StatusUpdate};
use crate::domain::payment::{MobileMoneyProvider, PaymentError, PaymentMethod, PhoneNumber};
use crate::domain::wallet::{DepositRequest, TransferRequest, WithdrawRequest};
use crate::metrics::ClientMetrics;
use crate::state::SessionStore;

// ============================================================================
// Command Execution
// ============================================================================

pub async fn run(command: Command, client: ApiClient, metrics: Arc<ClientMetrics>) -> Result<()> {
    match command {
        Command::Products { business, search, page } => products(&client, &business, search, &page).await,
        Command::Product { id } => {
            let product = client.get_product(&id).await?;
            render::product(&product);
            Ok(())
        }
        Command::Businesses { page } => businesses(&client, &page).await,
        Command::Checkout(args) => checkout(client, metrics, args).await,
        Command::Orders { command } => orders(client, command).await,
        Command::Wallet { command } => wallet(&client, command).await,
        Command::Analytics { kind, business, unit } => {
            let chart = client.fetch(kind, &business, unit).await?;
            render::chart(&chart);
            Ok(())
        }
    }
}

async fn products(client: &ApiClient, business: &BusinessId, search: Option<String>, page: &PageArgs) -> Result<()> {
    if page.all {
        let mut list = PagedList::new(page.limit);
        list.load_all(move |request| client.list_products(business, search.clone(), request))
            .await?;
        render::products(list.items());
        return Ok(());
    }

    let result = client
        .list_products(business, search, PageRequest::new(page.page, page.limit))
        .await?;
    render::products(&result.data);
    render::page_footer(&result.meta);
    Ok(())
}

async fn businesses(client: &ApiClient, page: &PageArgs) -> Result<()> {
    if page.all {
        let mut list = PagedList::new(page.limit);
        list.load_all(move |request| client.list_businesses(request)).await?;
        render::businesses(list.items());
        return Ok(());
    }

    let result = client
        .list_businesses(PageRequest::new(page.page, page.limit))
        .await?;
    render::businesses(&result.data);
    render::page_footer(&result.meta);
    Ok(())
}

fn payment_method(choice: PaymentChoice, phone: Option<&str>, provider: Option<&str>) -> Result<PaymentMethod, PaymentError> {
    match choice {
        PaymentChoice::Cash => Ok(PaymentMethod::Cash),
        PaymentChoice::Stripe => Ok(PaymentMethod::Stripe),
        PaymentChoice::MobileMoney => {
            let (Some(phone), Some(provider)) = (phone, provider) else {
                return Err(PaymentError::MissingMobileMoneyDetails);
            };
            Ok(PaymentMethod::MobileMoney {
                phone_number: PhoneNumber::parse(phone)?,
                provider: MobileMoneyProvider::from_str(provider)?,
            })
        }
    }
}

fn add_line(line: LineSpec, default_supplier: &BusinessId) -> CartCommand {
    let supplier = line.supplier.unwrap_or_else(|| default_supplier.clone());

    CartCommand::AddItem {
        product: CartProduct {
            product_id: ProductId::new(line.variant_id.as_str()),
            name: line.variant_id.to_string(),
            business_id: supplier.clone(),
            supplier_business_id: supplier.clone(),
            supplier_name: supplier.to_string(),
            image_url: None,
        },
        variant: CartVariant {
            id: line.variant_id.clone(),
            name: line.variant_id.to_string(),
            price: line.price,
        },
        quantity: line.quantity,
    }
}

async fn checkout(client: ApiClient, metrics: Arc<ClientMetrics>, args: CheckoutArgs) -> Result<()> {
    let payment = payment_method(args.payment, args.phone.as_deref(), args.provider.as_deref())?;

    let session = SessionStore::new(metrics.clone());
    session
        .select_business(BusinessRef {
            id: args.business.clone(),
            name: args.business.to_string(),
            kind: None,
        })
        .await;
    for line in args.lines {
        session.dispatch(add_line(line, &args.supplier)).await?;
    }

    tracing::info!(
        session_id = %session.session_id().await,
        total = %session.total_price().await,
        "Cart ready"
    );

    let api = Arc::new(client);
    let handler = CheckoutHandler::new(api.clone(), api, session, metrics);
    let outcome = handler
        .checkout(CheckoutRequest {
            notes: args.notes,
            payment,
        })
        .await?;

    match outcome {
        CheckoutOutcome::NothingToCheckout => println!("Cart is empty, nothing to check out."),
        CheckoutOutcome::Placed { order, intent } => render::placed(&order, &intent),
    }
    Ok(())
}

async fn orders(client: ApiClient, command: OrdersCommand) -> Result<()> {
    match command {
        OrdersCommand::List { business, status, page } => {
            let scope = business.map_or(OrderScope::Mine, OrderScope::Business);

            if page.all {
                let (api, scope) = (&client, &scope);
                let mut list = PagedList::new(page.limit);
                list.load_all(move |request| api.list_orders(scope, status, request))
                    .await?;
                render::orders(list.items());
                return Ok(());
            }

            let result = client
                .list_orders(&scope, status, PageRequest::new(page.page, page.limit))
                .await?;
            render::orders(&result.data);
            render::page_footer(&result.meta);
        }
        OrdersCommand::Show { id } => {
            let order = client.get_order(&id).await?;
            render::order(&order);
        }
        OrdersCommand::Cancel { id, reason } => {
            let order = client.update_status(&id, &StatusUpdate::cancel(reason)).await?;
            render::order(&order);
        }
        OrdersCommand::SetStatus { id, status, reason } => {
            let order = client.update_status(&id, &StatusUpdate { status, reason }).await?;
            render::order(&order);
        }
        OrdersCommand::Watch {
            id,
            interval_secs,
            max_polls,
        } => {
            let tracker = OrderTracker::new(Arc::new(client));
            let order = tracker
                .watch(&id, Duration::from_secs(interval_secs), max_polls)
                .await?;
            render::order(&order);
        }
    }
    Ok(())
}

fn optional_phone(phone: Option<&str>) -> Result<Option<PhoneNumber>, PaymentError> {
    phone.map(PhoneNumber::parse).transpose()
}

fn optional_provider(provider: Option<&str>) -> Result<Option<MobileMoneyProvider>, PaymentError> {
    provider.map(MobileMoneyProvider::from_str).transpose()
}

async fn wallet(client: &ApiClient, command: WalletCommand) -> Result<()> {
    match command {
        WalletCommand::Show => {
            let (wallet, recent) = try_join(
                client.get_wallet(),
                client.list_transactions(PageRequest::first(10)),
            )
            .await?;
            render::wallet(&wallet);
            render::transactions(&recent.data);
        }
        WalletCommand::History { page } => {
            if page.all {
                let mut list = PagedList::new(page.limit);
                list.load_all(move |request| client.list_transactions(request)).await?;
                render::transactions(list.items());
                return Ok(());
            }

            let result = client
                .list_transactions(PageRequest::new(page.page, page.limit))
                .await?;
            render::transactions(&result.data);
            render::page_footer(&result.meta);
        }
        WalletCommand::Deposit { amount, phone, provider } => {
            let request = DepositRequest::new(
                amount,
                optional_phone(phone.as_deref())?,
                optional_provider(provider.as_deref())?,
            )?;
            let transaction = client.deposit(&request).await?;
            render::transactions(std::slice::from_ref(&transaction));
        }
        WalletCommand::Withdraw { amount, phone, provider } => {
            let request = WithdrawRequest::new(
                amount,
                optional_phone(phone.as_deref())?,
                optional_provider(provider.as_deref())?,
            )?;
            let transaction = client.withdraw(&request).await?;
            render::transactions(std::slice::from_ref(&transaction));
        }
        WalletCommand::Transfer { to, amount, description } => {
            let recipient = PhoneNumber::parse(&to)?;
            let request = TransferRequest::new(recipient, amount, description)?;
            let transaction = client
                .transfer(&request)
                .await
                .with_context(|| format!("transfer to {to}"))?;
            render::transactions(std::slice::from_ref(&transaction));
        }
    }
    Ok(())
}
