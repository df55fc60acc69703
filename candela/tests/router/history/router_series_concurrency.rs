use std::sync::Arc;

use candela::{Candela, DateRange};
use proptest::prelude::*;

use crate::helpers::{MockConnector, d, daily_candles, m_candles, range, sber};

fn reversed_latency(parallel: usize) -> (Arc<MockConnector>, Candela) {
    // Later chunks answer sooner, so completion order is the reverse of chunk order.
    let conn = Arc::new(MockConnector {
        delay_fn: Some(Arc::new(|r: Option<DateRange>| {
            let r = r.unwrap();
            let days_left = (d(2024, 12, 31) - r.start()).num_days();
            u64::try_from(days_left).unwrap()
        })),
        ..m_candles("m", vec![], |_, r| Ok(daily_candles(r.unwrap())))
    });
    let candela = Candela::builder()
        .with_connector(conn.clone())
        .max_chunk_span_days(29)
        .max_concurrent_chunks(parallel)
        .build()
        .unwrap();
    (conn, candela)
}

#[tokio::test(start_paused = true)]
async fn concurrent_chunks_are_reassembled_in_chunk_order() {
    let (conn, candela) = reversed_latency(4);
    let outcome = candela
        .fetch_series(&sber(), Some(range(d(2024, 1, 1), d(2024, 12, 31))))
        .await
        .unwrap();
    assert_eq!(conn.calls().len(), 13);
    assert_eq!(outcome.series.len(), 366);
    let dates: Vec<_> = outcome.series.dates().collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn concurrency_never_changes_the_series(parallel in 1usize..8) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();
        let (series, sequential) = rt.block_on(async {
            let (_, concurrent) = reversed_latency(parallel);
            let (_, single) = reversed_latency(1);
            let r = Some(range(d(2024, 1, 1), d(2024, 12, 31)));
            (
                concurrent.fetch_series(&sber(), r).await.unwrap().series,
                single.fetch_series(&sber(), r).await.unwrap().series,
            )
        });
        prop_assert_eq!(series, sequential);
    }
}
