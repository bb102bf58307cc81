//! Built-in sample orders, shown when the workbook source yields nothing.
//!
//! The set mirrors the reference workbook the store circulates internally,
//! so the order screen is demonstrable on a machine that has never seen the
//! real file.

use bookworld_core::{OrderRecord, OrderSource};

// (id, composition, order_date, delivery_date, pickup_point_id,
//  client_name, pickup_code, status)
#[rustfmt::skip]
const SAMPLE_ORDERS: &[(i64, &str, &str, &str, i64, &str, &str, &str)] = &[
    (1001, "B112F4, 1, F635R4, 2", "15.02.2025", "20.02.2025", 3,  "Белов Алексей Дмитриевич",   "Z1X9Y2", "Доставлен"),
    (1002, "H782T5, 1, G783F5, 1", "16.02.2025", "21.02.2025", 7,  "Соколова Мария Андреевна",   "A3B4C5", "Доставлен"),
    (1003, "J384T6, 1, D572U8, 1", "18.02.2025", "23.02.2025", 12, "Морозов Иван Павлович",      "D6E7F8", "Доставлен"),
    (1004, "F572H7, 1, D329H3, 1", "20.02.2025", "25.02.2025", 5,  "Лебедева Ольга Васильевна",  "G9H0I1", "Доставлен"),
    (1005, "B112F4, 2, F635R4, 1", "01.03.2025", "06.03.2025", 18, "Белов Алексей Дмитриевич",   "J2K3L4", "В обработке"),
    (1006, "H782T5, 1, G783F5, 2", "02.03.2025", "07.03.2025", 22, "Соколова Мария Андреевна",   "M5N6O7", "В обработке"),
    (1007, "J384T6, 3, D572U8, 1", "03.03.2025", "08.03.2025", 9,  "Морозов Иван Павлович",      "P8Q9R0", "В обработке"),
    (1008, "F572H7, 1, D329H3, 2", "04.03.2025", "09.03.2025", 31, "Лебедева Ольга Васильевна",  "S1T2U3", "В обработке"),
    (1009, "B320R5, 1, G432E4, 1", "05.03.2025", "10.03.2025", 14, "Белов Алексей Дмитриевич",   "V4W5X6", "Новый"),
    (1010, "S213E3, 1, E482R4, 1", "06.03.2025", "11.03.2025", 27, "Соколова Мария Андреевна",   "Y7Z8A9", "Новый"),
];

/// Returns the built-in sample order set, in file order.
pub fn sample_orders() -> Vec<OrderRecord> {
    SAMPLE_ORDERS
        .iter()
        .map(
            |&(id, composition, order_date, delivery_date, pickup, client, code, status)| {
                OrderRecord {
                    id: id.to_string(),
                    composition: composition.to_string(),
                    order_date: order_date.to_string(),
                    delivery_date: delivery_date.to_string(),
                    pickup_point_id: pickup,
                    client_name: client.to_string(),
                    pickup_code: code.to_string(),
                    status: status.to_string(),
                    source: OrderSource::Workbook,
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_is_ten_orders_with_sequential_ids() {
        let orders = sample_orders();
        assert_eq!(orders.len(), 10);
        for (i, order) in orders.iter().enumerate() {
            assert_eq!(order.id, (1001 + i as i64).to_string());
            assert_eq!(order.source, OrderSource::Workbook);
        }
    }

    #[test]
    fn sample_statuses_are_display_labels() {
        for order in sample_orders() {
            assert!(["Доставлен", "В обработке", "Новый"].contains(&order.status.as_str()));
        }
    }
}
