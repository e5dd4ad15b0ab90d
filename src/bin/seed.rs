use chrono::Utc;
use foodiq_api::{
    config::database_url,
    db::{create_pool, run_migrations},
    services::auth_service::hash_password,
};
use sqlx::SqlitePool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let pool = create_pool(&database_url(), 1).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let operator_id = ensure_user(
        &pool,
        "canteen@foodiq.local",
        "canteen123",
        "canteen",
        "Campus Canteen",
        Some("Main Building"),
    )
    .await?;
    let partner_id = ensure_user(
        &pool,
        "ngo@foodiq.local",
        "ngo12345",
        "ngo",
        "Annapurna Food Bank",
        Some("Andheri East"),
    )
    .await?;
    seed_menu(&pool, operator_id).await?;
    seed_ngos(&pool, partner_id).await?;

    println!("Seed completed. Operator ID: {operator_id}, Partner ID: {partner_id}");
    Ok(())
}

async fn ensure_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    role: &str,
    name: &str,
    location: Option<&str>,
) -> anyhow::Result<i64> {
    let password_hash = hash_password(password.to_string()).await?;

    sqlx::query(
        r#"
        INSERT INTO users (email, password_hash, role, name, location, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(name)
    .bind(location)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let (user_id,): (i64,) = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_menu(pool: &SqlitePool, operator_id: i64) -> anyhow::Result<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items WHERE operator_id = ?")
        .bind(operator_id)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("Menu already seeded");
        return Ok(());
    }

    let items = [
        ("Vada Pav", 20.0, "breakfast"),
        ("Samosa Pav", 22.0, "breakfast"),
        ("Idli Sambar", 40.0, "breakfast"),
        ("Masala Dosa", 70.0, "breakfast"),
        ("Upma", 25.0, "breakfast"),
        ("Veg Thali", 100.0, "lunch"),
        ("Chicken Thali", 150.0, "lunch"),
        ("Chicken Biryani", 160.0, "lunch"),
        ("Veg Biryani", 120.0, "lunch"),
        ("Dal Khichdi", 90.0, "lunch"),
        ("Pav Bhaji", 100.0, "dinner"),
        ("Veg Frankie", 60.0, "dinner"),
        ("Chicken Frankie", 90.0, "dinner"),
        ("Veg Pizza", 120.0, "dinner"),
        ("Cold Coffee", 60.0, "dinner"),
    ];

    for (name, price, category) in items {
        sqlx::query(
            r#"
            INSERT INTO menu_items (operator_id, name, price, category, is_active, created_at)
            VALUES (?, ?, ?, ?, 1, ?)
            "#,
        )
        .bind(operator_id)
        .bind(name)
        .bind(price)
        .bind(category)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    }

    println!("Seeded menu items");
    Ok(())
}

async fn seed_ngos(pool: &SqlitePool, partner_id: i64) -> anyhow::Result<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ngo_partners")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("NGO directory already seeded");
        return Ok(());
    }

    let partners = [
        (
            Some(partner_id),
            "Annapurna Food Bank",
            "Andheri East",
            19.1136,
            72.8697,
            "Cooked meals for night shelters",
        ),
        (
            None,
            "Roti Sharing Trust",
            "Dadar",
            19.0178,
            72.8478,
            "Breakfast items, packaged snacks",
        ),
        (
            None,
            "Hope Kitchen",
            "Kurla West",
            19.0726,
            72.8845,
            "Rice, dal and vegetables",
        ),
    ];

    for (user_id, name, location, latitude, longitude, needs) in partners {
        sqlx::query(
            r#"
            INSERT INTO ngo_partners (user_id, name, location, latitude, longitude, needs, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(location)
        .bind(latitude)
        .bind(longitude)
        .bind(needs)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    }

    println!("Seeded NGO partners");
    Ok(())
}
