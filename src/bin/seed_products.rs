//! One-shot provisioning tool: seeds the demo catalog.

use anyhow::Context;
use storefront::config::AppConfig;
use storefront::db;

struct SeedProduct {
  name: &'static str,
  description: &'static str,
  price: i64,
  stock: i64,
  image: &'static str,
}

const PRODUCTS: &[SeedProduct] = &[
  SeedProduct {
    name: "Điếu cày tre truyền thống",
    description: "Điếu cày tre, âm êm, cột đồng chắc chắn.",
    price: 150_000,
    stock: 20,
    image: "/img/dieu-cay-tre.jpg",
  },
  SeedProduct {
    name: "Điếu cày inox mini",
    description: "Gọn nhẹ, dễ vệ sinh, phù hợp mang theo.",
    price: 220_000,
    stock: 15,
    image: "/img/dieu-cay-inox.jpg",
  },
  SeedProduct {
    name: "Thuốc lào Tiên Lãng 100g",
    description: "Vị đậm, hương thơm đặc trưng.",
    price: 90_000,
    stock: 40,
    image: "/img/thuoc-lao-100g.jpg",
  },
  SeedProduct {
    name: "Thuốc lào Quảng Trị 200g",
    description: "Hậu vị mạnh, phù hợp khách quen.",
    price: 170_000,
    stock: 30,
    image: "/img/thuoc-lao-200g.jpg",
  },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let config = AppConfig::from_env().context("loading configuration")?;
  let pool = db::connect(&config.database_url).await.context("connecting to database")?;
  db::init_schema(&pool).await.context("initializing schema")?;

  for p in PRODUCTS {
    sqlx::query("INSERT INTO products (name, description, price, stock, image) VALUES (?1, ?2, ?3, ?4, ?5)")
      .bind(p.name)
      .bind(p.description)
      .bind(p.price)
      .bind(p.stock)
      .bind(p.image)
      .execute(&pool)
      .await
      .with_context(|| format!("seeding product '{}'", p.name))?;
  }

  println!("Seeded {} products.", PRODUCTS.len());
  Ok(())
}
