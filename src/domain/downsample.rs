// Bucket downsampling for long sample runs
use super::risk::Risk;
use super::series::Sample;

/// Reduce sorted `samples` to at most `max_points` by bucket averaging.
///
/// Each bucket keeps its middle sample's timestamp, the mean of its values and
/// its most severe risk, so a short unhealthy spike survives. A bucket holding
/// any incomplete sample collapses to a gap (`value = None`), and any
/// unrecognized risk in a bucket wins over the known levels.
pub fn downsample(samples: Vec<Sample>, max_points: usize) -> Vec<Sample> {
    if max_points == 0 || samples.len() <= max_points {
        return samples;
    }

    let bucket_size = (samples.len() as f64 / max_points as f64).ceil() as usize;
    let mut downsampled = Vec::with_capacity(max_points);

    for chunk in samples.chunks(bucket_size) {
        let mid_idx = chunk.len() / 2;

        let value = if chunk.iter().all(|s| s.is_complete()) {
            Some(chunk.iter().filter_map(|s| s.value).sum::<f64>() / chunk.len() as f64)
        } else {
            None
        };

        downsampled.push(Sample {
            timestamp: chunk[mid_idx].timestamp,
            value,
            risk: worst_risk(chunk),
        });
    }

    downsampled
}

fn worst_risk(chunk: &[Sample]) -> Option<Risk> {
    let present: Vec<&Risk> = chunk.iter().filter_map(|s| s.risk.as_ref()).collect();

    if let Some(unrecognized) = present.iter().find(|r| r.severity().is_none()) {
        return Some((*unrecognized).clone());
    }

    present.into_iter().max_by_key(|r| r.severity()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_series_untouched() {
        let samples = vec![Sample::new(1, 1.0, Risk::Healthy)];
        assert_eq!(downsample(samples.clone(), 10), samples);
        assert_eq!(downsample(samples.clone(), 0), samples);
    }

    #[test]
    fn test_buckets_keep_worst_risk() {
        let samples: Vec<Sample> = (0..6)
            .map(|i| {
                let risk = if i == 4 { Risk::Unhealthy } else { Risk::Healthy };
                Sample::new(i * 10, i as f64, risk)
            })
            .collect();

        let result = downsample(samples, 2);
        assert_eq!(result.len(), 2);

        assert_eq!(result[0].timestamp, Some(10));
        assert_eq!(result[0].value, Some(1.0));
        assert_eq!(result[0].risk, Some(Risk::Healthy));

        assert_eq!(result[1].timestamp, Some(40));
        assert_eq!(result[1].value, Some(4.0));
        assert_eq!(result[1].risk, Some(Risk::Unhealthy));
    }

    #[test]
    fn test_bucket_without_values_stays_a_gap() {
        let samples = vec![
            Sample { timestamp: Some(1), value: None, risk: None },
            Sample { timestamp: Some(2), value: None, risk: None },
            Sample::new(3, 6.0, Risk::Warning),
            Sample::new(4, 8.0, Risk::Observe),
        ];

        let result = downsample(samples, 2);
        assert_eq!(result[0].value, None);
        assert_eq!(result[0].risk, None);
        assert_eq!(result[1].value, Some(7.0));
        assert_eq!(result[1].risk, Some(Risk::Warning));
    }

    #[test]
    fn test_incomplete_sample_turns_bucket_into_gap() {
        let samples = vec![
            Sample::new(1, 2.0, Risk::Healthy),
            Sample { timestamp: Some(2), value: None, risk: Some(Risk::Healthy) },
            Sample::new(3, 4.0, Risk::Healthy),
            Sample { timestamp: Some(4), value: Some(6.0), risk: None },
            Sample::new(5, 1.0, Risk::Healthy),
            Sample::new(6, 3.0, Risk::Healthy),
        ];

        let result = downsample(samples, 3);
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].value, None);
        assert_eq!(result[0].risk, Some(Risk::Healthy));
        assert_eq!(result[1].value, None);
        assert_eq!(result[2].value, Some(2.0));
    }

    #[test]
    fn test_unrecognized_risk_beats_known_levels() {
        let odd = Risk::Unrecognized("CRITICAL".to_string());
        let samples = vec![
            Sample::new(1, 1.0, Risk::Unhealthy),
            Sample::new(2, 1.0, odd.clone()),
            Sample::new(3, 1.0, Risk::Healthy),
            Sample::new(4, 1.0, Risk::Healthy),
        ];

        let result = downsample(samples, 2);
        assert_eq!(result[0].risk, Some(odd));
        assert_eq!(result[0].value, Some(1.0));
        assert_eq!(result[1].risk, Some(Risk::Healthy));
    }

    #[test]
    fn test_unrecognized_only_bucket() {
        let odd = Risk::Unrecognized("CRITICAL".to_string());
        let samples = vec![
            Sample::new(1, 1.0, odd.clone()),
            Sample::new(2, 1.0, odd.clone()),
            Sample::new(3, 1.0, Risk::Healthy),
        ];

        let result = downsample(samples, 2);
        assert_eq!(result[0].risk, Some(odd));
    }
}
