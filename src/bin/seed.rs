use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use food_order_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_id = ensure_user(&pool, "Demo User", "user@example.com", "password123").await?;
    seed_menu(&pool).await?;

    println!("Seed completed. User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    row.map(|(id,)| id)
        .ok_or_else(|| anyhow::anyhow!("failed to upsert user"))
}

async fn seed_menu(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let menu = [
        ("Greek Salad", "Fresh vegetables with feta", 12, "Salad"),
        ("Veg Rolls", "Crisp spring rolls", 15, "Rolls"),
        ("Chicken Sandwich", "Grilled chicken on sourdough", 18, "Sandwich"),
        ("Fruit Ice Cream", "Seasonal fruit scoops", 22, "Desserts"),
    ];

    for (name, description, price, category) in menu {
        sqlx::query(
            r#"
            INSERT INTO food_items (id, name, description, price, category, image)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (SELECT 1 FROM food_items WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(price as i64)
        .bind(category)
        .bind(format!("{}.png", name.to_lowercase().replace(' ', "_")))
        .execute(pool)
        .await?;
    }

    Ok(())
}
