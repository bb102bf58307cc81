//! Seeds the reference data set: staff and client accounts, the publisher
//! and genre dictionaries, pickup points, the starting catalog and a few
//! store orders.
//!
//! Idempotent: every insert is `INSERT OR IGNORE`, so re-running against an
//! existing database adds nothing.
//!
//! Usage: `seed [--db path/to/bookstore.db]` (default `./bookstore.db`).

use bookworld_db::{Database, DbConfig, DbResult};
use tracing::info;

// (login, password, full_name, role)
const USERS: &[(&str, &str, &str, &str)] = &[
    ("a.orlova@bookworld.ru", "Ah7kLp", "Орлова Алина Викторовна", "admin"),
    ("d.volkov@bookworld.ru", "Bm2qR9", "Волков Денис Сергеевич", "admin"),
    ("i.semenova@bookworld.ru", "Cn8tWx", "Семенова Ирина Олеговна", "manager"),
    ("m.kozlov@bookworld.ru", "Df4yUz", "Козлов Максим Игоревич", "manager"),
    ("t.nikolaeva@bookworld.ru", "Eg6vAs", "Николаева Татьяна Петровна", "manager"),
    ("a.belov@example.com", "Fh9jQw", "Белов Алексей Дмитриевич", "client"),
    ("m.sokolova@example.com", "Gi1kEx", "Соколова Мария Андреевна", "client"),
    ("i.morozov@example.com", "Hj2lFy", "Морозов Иван Павлович", "client"),
    ("o.lebedeva@example.com", "Kk3mGz", "Лебедева Ольга Васильевна", "client"),
];

const PUBLISHERS: &[&str] = &[
    "Эксмо",
    "АСТ",
    "Питер",
    "Манн, Иванов и Фербер",
    "Альпина Паблишер",
    "Азбука",
    "Махаон",
    "София",
    "Иностранка",
    "Дрофа",
];

const GENRES: &[&str] = &[
    "Классика",
    "Антиутопия",
    "Детская",
    "Детектив",
    "Фэнтези",
    "Роман",
    "Фантастика",
    "Научная фантастика",
];

// (name, address, phone)
const PICKUP_POINTS: &[(&str, &str, &str)] = &[
    ("Пункт выдачи 1", "г. Москва, ул. Тверская, д. 10", "+7 (495) 123-45-67"),
    ("Пункт выдачи 2", "г. Москва, пр-т Мира, д. 25", "+7 (495) 234-56-78"),
    ("Пункт выдачи 3", "г. Санкт-Петербург, Невский пр-т, д. 45", "+7 (812) 345-67-89"),
    ("Пункт выдачи 4", "г. Санкт-Петербург, ул. Садовая, д. 12", "+7 (812) 456-78-90"),
    ("Пункт выдачи 5", "г. Екатеринбург, ул. Ленина, д. 33", "+7 (343) 567-89-01"),
];

// (title, author, genre_id, publisher_id, year, price_kopecks, stock, cover, description)
#[rustfmt::skip]
const BOOKS: &[(&str, &str, i64, i64, i64, i64, i64, &str, &str)] = &[
    ("Мастер и Маргарита", "Михаил Булгаков", 1, 1, 1967, 45000, 12, "1.png",
     "Бессмертное произведение русской литературы, полное мистики и философских размышлений."),
    ("1984", "Джордж Оруэлл", 2, 2, 1949, 38000, 8, "2.png",
     "Знаменитая антиутопия, рассказывающая о тоталитарном обществе под постоянным контролем."),
    ("Преступление и наказание", "Фёдор Достоевский", 1, 3, 1866, 52000, 15, "3.png",
     "Глубокий психологический роман о преступлении и моральных муках раскаяния."),
    ("Три товарища", "Эрих Мария Ремарк", 6, 4, 1936, 42000, 7, "4.png",
     "Трогательная история о дружбе и любви на фоне сложного времени в Германии."),
    ("Маленький принц", "Антуан де Сент-Экзюпери", 3, 5, 1943, 35000, 20, "5.png",
     "Философская сказка для детей и взрослых, говорящая о самом важном в жизни."),
    ("Шерлок Холмс (сборник)", "Артур Конан Дойл", 4, 6, 1892, 48000, 9, "6.png",
     "Знаменитые расследования великого сыщика Шерлока Холмса и его друга доктора Ватсона."),
    ("Гарри Поттер и философский камень", "Джоан Роулинг", 5, 7, 1997, 55000, 14, "7.png",
     "Первая книга культовой серии о юном волшебнике Гарри Поттере."),
    ("Убийство в Восточном экспрессе", "Агата Кристи", 4, 8, 1934, 40000, 11, "8.png",
     "Одно из самых известных дел Эркюля Пуаро, разворачивающееся в поезде."),
    ("Война и мир (том 1)", "Лев Толстой", 1, 9, 1869, 60000, 6, "9.png",
     "Монументальный роман-эпопея, охватывающий судьбы людей на фоне войны с Наполеоном."),
    ("Алхимик", "Пауло Коэльо", 6, 10, 1988, 32000, 18, "10.png",
     "Притча о юном пастухе Сантьяго, отправившемся на поиски своего сокровища и предназначения."),
    ("Портрет Дориана Грея", "Оскар Уайльд", 1, 1, 1890, 28000, 5, "placeholder.png",
     "История о красоте, разврате и таинственном портрете, стареющем вместо своего владельца."),
    ("Над пропастью во ржи", "Джером Сэлинджер", 6, 2, 1951, 35000, 10, "placeholder.png",
     "Роман о подростковом бунте и поиске себя в лицемерном взрослом мире."),
    ("Игра Эндера", "Орсон Скотт Кард", 7, 3, 1985, 42000, 0, "placeholder.png",
     "История одаренного мальчика, готовящегося к защите Земли от инопланетной угрозы."),
    ("Автостопом по галактике", "Дуглас Адамс", 7, 4, 1979, 38000, 13, "placeholder.png",
     "Юмористическая фантастика о невероятных приключениях землянина Артура Дента."),
    ("Цветы для Элджернона", "Дэниел Киз", 6, 5, 1966, 40000, 8, "placeholder.png",
     "Трогательная история человека, участвующего в эксперименте по повышению интеллекта."),
];

// (user_id, pickup_point_id, status, total_kopecks, order_date)
const ORDERS: &[(i64, i64, &str, i64, &str)] = &[
    (6, 1, "pending", 85000, "2024-01-15 10:30:00"),
    (7, 2, "processing", 120000, "2024-01-16 14:20:00"),
    (8, 3, "ready", 65000, "2024-01-17 09:15:00"),
];

// (order_id, book_id, quantity, price_kopecks)
const ORDER_ITEMS: &[(i64, i64, i64, i64)] = &[
    (1, 1, 1, 45000),
    (1, 2, 1, 38000),
    (2, 3, 2, 52000),
    (2, 4, 1, 42000),
    (3, 5, 1, 35000),
    (3, 6, 1, 48000),
];

async fn seed(db: &Database) -> DbResult<()> {
    let pool = db.pool();

    for (login, password, full_name, role) in USERS {
        sqlx::query(
            "INSERT OR IGNORE INTO users (login, password, full_name, role) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(login)
        .bind(password)
        .bind(full_name)
        .bind(role)
        .execute(pool)
        .await?;
    }
    info!(count = USERS.len(), "Users seeded");

    for name in PUBLISHERS {
        sqlx::query("INSERT OR IGNORE INTO publishers (name) VALUES (?1)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    for name in GENRES {
        sqlx::query("INSERT OR IGNORE INTO genres (name) VALUES (?1)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    for (name, address, phone) in PICKUP_POINTS {
        sqlx::query(
            "INSERT OR IGNORE INTO pickup_points (name, address, phone) VALUES (?1, ?2, ?3)",
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .execute(pool)
        .await?;
    }
    info!(
        publishers = PUBLISHERS.len(),
        genres = GENRES.len(),
        pickup_points = PICKUP_POINTS.len(),
        "Dictionaries seeded"
    );

    // Books lack a natural UNIQUE key, so guard against re-runs explicitly.
    let book_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await?;
    if book_count == 0 {
        for (title, author, genre_id, publisher_id, year, price, stock, cover, description) in
            BOOKS
        {
            sqlx::query(
                r#"
                INSERT INTO books
                    (title, author, genre_id, publisher_id, year, price_kopecks,
                     stock_quantity, is_on_sale, discount_price_kopecks,
                     cover_image, description)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, FALSE, NULL, ?8, ?9)
                "#,
            )
            .bind(title)
            .bind(author)
            .bind(genre_id)
            .bind(publisher_id)
            .bind(year)
            .bind(price)
            .bind(stock)
            .bind(cover)
            .bind(description)
            .execute(pool)
            .await?;
        }
        info!(count = BOOKS.len(), "Catalog seeded");
    }

    let order_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await?;
    if order_count == 0 {
        for (user_id, pickup_point_id, status, total, order_date) in ORDERS {
            sqlx::query(
                r#"
                INSERT INTO orders
                    (user_id, pickup_point_id, status, total_amount_kopecks, order_date)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(user_id)
            .bind(pickup_point_id)
            .bind(status)
            .bind(total)
            .bind(order_date)
            .execute(pool)
            .await?;
        }
        for (order_id, book_id, quantity, price) in ORDER_ITEMS {
            sqlx::query(
                "INSERT INTO order_items (order_id, book_id, quantity, price_kopecks) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(order_id)
            .bind(book_id)
            .bind(quantity)
            .bind(price)
            .execute(pool)
            .await?;
        }
        info!(
            orders = ORDERS.len(),
            items = ORDER_ITEMS.len(),
            "Sample orders seeded"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let mut db_path = String::from("./bookstore.db");
    while let Some(arg) = args.next() {
        if arg == "--db" {
            if let Some(path) = args.next() {
                db_path = path;
            }
        }
    }

    info!(path = %db_path, "Seeding database");
    let db = Database::new(DbConfig::new(&db_path)).await?;
    seed(&db).await?;
    db.close().await;
    info!("Done");

    Ok(())
}
