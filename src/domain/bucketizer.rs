// Splits a risk-annotated series into color zones
use super::risk::{ColorResolver, ZoneColor};
use super::series::{PlotPoint, Sample, Series, Zone};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BucketizeError {
    #[error("cannot bucketize an empty sample set")]
    EmptyInput,
}

/// Sort `samples` by timestamp and build the plotted series with its zones.
///
/// Samples missing a timestamp, value or risk plot as gaps (`y = None`). A gap
/// resets the running color to [`ZoneColor::Unknown`], so the next complete
/// sample always opens a new zone. The caller's slice is left untouched.
pub fn bucketize<R>(samples: &[Sample], resolver: &R) -> Result<Series, BucketizeError>
where
    R: ColorResolver + ?Sized,
{
    let mut sorted: Vec<&Sample> = samples.iter().collect();
    sorted.sort_by_key(|s| s.sort_key());

    let first = sorted.first().ok_or(BucketizeError::EmptyInput)?;
    let mut current = resolver.resolve(first.risk.as_ref());

    let mut points = Vec::with_capacity(sorted.len());
    let mut zones = vec![Zone::open(current.clone())];

    for sample in sorted {
        let color = resolver.resolve(sample.risk.as_ref());

        match (sample.timestamp, sample.value, &sample.risk) {
            (Some(t), Some(v), Some(_)) => {
                points.push(PlotPoint::value(t, v));
                if color != current {
                    if let Some(open) = zones.last_mut() {
                        open.end = Some(t);
                    }
                    zones.push(Zone::open(color.clone()));
                    current = color;
                }
            }
            _ => {
                current = ZoneColor::Unknown;
                points.push(PlotPoint::gap(sample.sort_key()));
            }
        }
    }

    tracing::trace!(points = points.len(), zones = zones.len(), "bucketized series");

    Ok(Series { points, zones })
}
