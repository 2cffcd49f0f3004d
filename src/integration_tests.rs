#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::app_system::{OfferSystem, OfferSystemConfig};
    use crate::domain::{CartCheckoutRequest, OfferRequest, OfferType};
    use crate::error::{CreateOfferError, ResolveError};
    use crate::offer_actor::{RegistryError, ValidationError};

    fn segments(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    fn system() -> OfferSystem {
        OfferSystem::new(&OfferSystemConfig::default())
    }

    #[tokio::test]
    async fn test_checkout_flat_amount_and_percent() {
        let system = system();
        system
            .offer_client
            .create_offer(OfferRequest::new(1, "FLATX", 10, segments(&["p1"])))
            .await
            .unwrap();
        system
            .offer_client
            .create_offer(OfferRequest::new(1, "FLATPERCENT", 10, segments(&["p2"])))
            .await
            .unwrap();
        system.segment_client.assign_segment(1, "p1".to_string()).await.unwrap();
        system.segment_client.assign_segment(2, "p2".to_string()).await.unwrap();

        let flat = system.resolver.apply_offer(&CartCheckoutRequest::new(1, 1, 200)).await.unwrap();
        assert_eq!(flat.final_cart_value, 190);
        assert_eq!(flat.offer_applied.unwrap().offer_type(), OfferType::FlatAmount);

        let percent = system.resolver.apply_offer(&CartCheckoutRequest::new(1, 2, 200)).await.unwrap();
        assert_eq!(percent.final_cart_value, 180);

        let floored = system.resolver.apply_offer(&CartCheckoutRequest::new(1, 2, 205)).await.unwrap();
        assert_eq!(floored.final_cart_value, 185);
    }

    #[tokio::test]
    async fn test_checkout_without_matching_offer_passes_through() {
        let system = system();
        system
            .offer_client
            .create_offer(OfferRequest::new(1, "FLATX", 10, segments(&["p1"])))
            .await
            .unwrap();
        system.segment_client.assign_segment(3, "p3".to_string()).await.unwrap();

        let result = system.resolver.apply_offer(&CartCheckoutRequest::new(1, 3, 200)).await.unwrap();
        assert_eq!(result.final_cart_value, 200);
        assert!(result.offer_applied.is_none());

        let other_restaurant = system.resolver.apply_offer(&CartCheckoutRequest::new(9, 3, 200)).await.unwrap();
        assert_eq!(other_restaurant.final_cart_value, 200);
    }

    #[tokio::test]
    async fn test_checkout_for_unknown_customer_is_unresolved() {
        let system = system();
        system
            .offer_client
            .create_offer(OfferRequest::new(1, "FLATX", 10, segments(&["p1"])))
            .await
            .unwrap();

        let result = system.resolver.apply_offer(&CartCheckoutRequest::new(1, 404, 200)).await;
        assert!(matches!(result, Err(ResolveError::SegmentUnresolved { customer_id: 404, .. })));
        assert_eq!(system.offer_client.offer_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_cart_and_oversized_flat_offer_clamp_to_zero() {
        let system = system();
        system
            .offer_client
            .create_offer(OfferRequest::new(7008, "FLATX", i64::from(i32::MAX), segments(&["p1"])))
            .await
            .unwrap();
        system.segment_client.assign_segment(1, "p1".to_string()).await.unwrap();

        let big = system.resolver.apply_offer(&CartCheckoutRequest::new(7008, 1, 500)).await.unwrap();
        assert_eq!(big.final_cart_value, 0);
        let empty = system.resolver.apply_offer(&CartCheckoutRequest::new(7008, 1, 0)).await.unwrap();
        assert_eq!(empty.final_cart_value, 0);
    }

    #[tokio::test]
    async fn test_rejected_requests_leave_registry_empty() {
        let system = system();
        let rejected = vec![
            OfferRequest::new(1002, "FLATX", -5, segments(&["p2"])),
            OfferRequest::new(2004, "UNKNOWN_TYPE", 10, segments(&["p1"])),
            OfferRequest::new(2001, "FLATX", 10, Vec::new()),
            OfferRequest::new(2002, "FLATX", 10, segments(&["p1"])).with_segments(None),
            OfferRequest::new(2005, "FLATX", 10, segments(&["p1"])).with_restaurant_id(None),
            OfferRequest::new(1, "FLATPERCENT", 101, segments(&["p1"])),
        ];
        for request in rejected {
            let result = system.offer_client.create_offer(request).await;
            assert!(matches!(result, Err(CreateOfferError::Validation(_))));
        }
        assert_eq!(system.offer_client.offer_count(), 0);
    }

    #[tokio::test]
    async fn test_partial_collision_leaves_other_segments_free() {
        let system = system();
        system
            .offer_client
            .create_offer(OfferRequest::new(1, "FLATX", 10, segments(&["s1"])))
            .await
            .unwrap();

        let result = system
            .offer_client
            .create_offer(OfferRequest::new(1, "FLATPERCENT", 20, segments(&["s1", "s2"])))
            .await;
        assert_eq!(
            result,
            Err(CreateOfferError::Registry(RegistryError::DuplicateOffer {
                restaurant_id: 1,
                segment: "s1".to_string()
            }))
        );
        assert!(system.offer_client.lookup(1, "s2").is_none());

        // s2 is still claimable on its own
        system
            .offer_client
            .create_offer(OfferRequest::new(1, "FLATPERCENT", 20, segments(&["s2"])))
            .await
            .unwrap();
        assert_eq!(system.offer_client.lookup(1, "s1").unwrap().offer_type(), OfferType::FlatAmount);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicates_exactly_one_succeeds() {
        let system = system();
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let offers = system.offer_client.clone();
            tasks.push(tokio::spawn(async move {
                offers
                    .create_offer(OfferRequest::new(506, "FLATX", 10, segments(&["p5"])))
                    .await
            }));
        }

        let mut successes = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) => assert_eq!(
                    e,
                    CreateOfferError::Registry(RegistryError::DuplicateOffer {
                        restaurant_id: 506,
                        segment: "p5".to_string()
                    })
                ),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(system.offer_client.offer_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_overlapping_segment_sets() {
        let system = system();
        let sets: [&[&str]; 5] = [&["a", "b"], &["b", "c"], &["c", "d"], &["d", "a"], &["a", "b", "c", "d"]];
        let mut tasks = Vec::new();
        for (value, labels) in sets.iter().enumerate() {
            let offers = system.offer_client.clone();
            let request = OfferRequest::new(7, "FLATX", value as i64, segments(labels));
            tasks.push(tokio::spawn(async move { offers.create_offer(request).await }));
        }

        let mut winners = Vec::new();
        for task in tasks {
            match task.await.unwrap() {
                Ok(offer) => winners.push(offer),
                Err(e) => assert!(matches!(
                    e,
                    CreateOfferError::Registry(RegistryError::DuplicateOffer { .. })
                )),
            }
        }

        // Winners never share a segment, and every claimed key points at its winner.
        let mut claimed = HashSet::new();
        for offer in &winners {
            for segment in offer.customer_segments() {
                assert!(claimed.insert(segment.clone()));
                assert_eq!(system.offer_client.lookup(7, segment).as_ref(), Some(offer));
            }
        }
        assert!(!winners.is_empty());
        assert_eq!(system.offer_client.offer_count(), winners.len());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_disjoint_keys_all_succeed() {
        let system = system();
        let mut tasks = Vec::new();
        for restaurant_id in 1..=32 {
            let offers = system.offer_client.clone();
            tasks.push(tokio::spawn(async move {
                offers
                    .create_offer(OfferRequest::new(restaurant_id, "FLATX", 5, segments(&["p1"])))
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        for restaurant_id in 1..=32u64 {
            assert!(system.offer_client.lookup(restaurant_id, "p1").is_some());
        }
        assert_eq!(system.offer_client.offer_count(), 32);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_lookups_never_see_a_second_offer_for_a_key() {
        let system = system();
        let writers: Vec<_> = (0..8)
            .map(|value| {
                let offers = system.offer_client.clone();
                tokio::spawn(async move {
                    offers
                        .create_offer(OfferRequest::new(11, "FLATX", value, segments(&["vip"])))
                        .await
                })
            })
            .collect();

        let offers = system.offer_client.clone();
        let reader = tokio::spawn(async move {
            let mut first_seen = None;
            for _ in 0..1000 {
                if let Some(offer) = offers.lookup(11, "vip") {
                    let seen = first_seen.get_or_insert_with(|| offer.clone());
                    assert_eq!(*seen, offer);
                }
                tokio::task::yield_now().await;
            }
        });

        for writer in writers {
            let _ = writer.await.unwrap();
        }
        reader.await.unwrap();

        let winner = system.offer_client.lookup(11, "vip").unwrap();
        for _ in 0..10 {
            assert_eq!(system.offer_client.lookup(11, "vip").unwrap(), winner);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_multi_segment_offer_becomes_visible_all_at_once() {
        let system = system();
        let offers = system.offer_client.clone();
        let writer = tokio::spawn(async move {
            for offer in 0..200 {
                let labels: Vec<String> = (0..50).map(|s| format!("o{}-s{}", offer, s)).collect();
                offers
                    .create_offer(OfferRequest::new(1, "FLATX", 5, labels))
                    .await
                    .unwrap();
            }
        });

        let count_gaps = |system: &OfferSystem| {
            system
                .offer_client
                .offers_for_restaurant(1)
                .iter()
                .flat_map(|offer| offer.customer_segments().iter())
                .filter(|segment| system.offer_client.lookup(1, segment).is_none())
                .count()
        };

        let mut gaps = 0;
        while !writer.is_finished() {
            gaps += count_gaps(&system);
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();
        gaps += count_gaps(&system);

        assert_eq!(gaps, 0);
        assert_eq!(system.offer_client.offer_count(), 200);
    }

    #[tokio::test]
    async fn test_validation_error_surfaces_unchanged() {
        let system = system();
        let result = system
            .offer_client
            .create_offer(OfferRequest::new(1, "FLATPERCENT", 150, segments(&["p1"])))
            .await;
        assert_eq!(
            result,
            Err(CreateOfferError::Validation(ValidationError::InvalidOfferValue {
                offer_type: "FLATPERCENT".to_string(),
                value: 150
            }))
        );
    }
}
