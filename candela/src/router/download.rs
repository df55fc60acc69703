use chrono::NaiveDate;

use crate::Candela;
use crate::router::util::resolve_tickers;
use candela_core::{CandelaError, Capability, DateRange, DownloadReport, SeriesGroups};

/// Builder to download the close series of several tickers into one wide table.
pub struct DownloadBuilder<'a> {
    pub(crate) candela: &'a Candela,
    pub(crate) tickers: Vec<String>,
    pub(crate) benchmark: Option<String>,
    // Validated in run().
    pub(crate) period: Option<(NaiveDate, NaiveDate)>,
}

impl<'a> DownloadBuilder<'a> {
    /// Create a new builder bound to a `Candela` instance.
    ///
    /// Starts with no tickers, no benchmark, and no period (open-ended request).
    #[must_use]
    pub const fn new(candela: &'a Candela) -> Self {
        Self {
            candela,
            tickers: Vec::new(),
            benchmark: None,
            period: None,
        }
    }

    /// Replace the ticker list.
    #[must_use]
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    /// Append one ticker.
    #[must_use]
    pub fn add_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.tickers.push(ticker.into());
        self
    }

    /// Prepend a benchmark ticker (for example `MOEX`) to the request.
    ///
    /// The benchmark becomes the first column. If it is also listed among the tickers
    /// it is still fetched only once.
    #[must_use]
    pub fn benchmark(mut self, ticker: impl Into<String>) -> Self {
        self.benchmark = Some(ticker.into());
        self
    }

    /// Restrict the download to the closed period `[start, end]`.
    #[must_use]
    pub const fn period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.period = Some((start, end));
        self
    }

    /// Restrict the download to an already validated range.
    #[must_use]
    pub const fn range(mut self, range: DateRange) -> Self {
        self.period = Some((range.start(), range.end()));
        self
    }

    /// Resolve the tickers, fetch each instrument chunk by chunk, and merge the results.
    ///
    /// Behavior:
    /// - The catalog is loaded once under `catalog_timeout`; unknown tickers become
    ///   `UnresolvedTicker` warnings and are skipped. If none resolve, or the catalog
    ///   cannot be loaded, the report has no table.
    /// - Instruments are fetched sequentially in request order. Skipped chunks become
    ///   `ChunkFailed` warnings; an instrument with no surviving chunk still gets an
    ///   all-missing column.
    /// - Chunk partials are backfilled per instrument, outer-joined on `date` across
    ///   instruments, and coalesced so each instrument ends up with one column named
    ///   after it.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no tickers were given or the chunk span is unusable,
    /// `InvalidRange` when the period starts after it ends, and `Unsupported` when no
    /// connector serves a catalog or candles.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "candela::download::run",
            skip(self),
            fields(tickers = self.tickers.len(), benchmark = ?self.benchmark),
        )
    )]
    pub async fn run(self) -> Result<DownloadReport, CandelaError> {
        let mut requested: Vec<String> = Vec::with_capacity(self.tickers.len() + 1);
        requested.extend(self.benchmark);
        requested.extend(self.tickers);
        if requested.is_empty() {
            return Err(CandelaError::InvalidArg(
                "no tickers specified for download".into(),
            ));
        }

        let range = self
            .period
            .map(|(start, end)| DateRange::new(start, end))
            .transpose()?;

        let catalog_connector = self.candela.catalog_connector()?;
        // Both capabilities are required up front.
        self.candela.candle_connector()?;

        let mut warnings: Vec<CandelaError> = Vec::new();
        let catalog = match catalog_connector.as_instrument_catalog() {
            Some(cat) => Candela::provider_call_with_timeout(
                catalog_connector.name(),
                Capability::Catalog.as_str(),
                self.candela.cfg.catalog_timeout,
                cat.instruments(),
            )
            .await
            .map_err(|e| crate::core::tag_err(catalog_connector.name(), e)),
            None => Err(CandelaError::unsupported(Capability::Catalog.as_str())),
        };
        let catalog = match catalog {
            Ok(c) => c,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "instrument catalog unavailable");
                warnings.push(e);
                Vec::new()
            }
        };

        let (instruments, unresolved) = resolve_tickers(&catalog, &requested);
        #[cfg(feature = "tracing")]
        for w in &unresolved {
            tracing::warn!(warning = %w, "skipping ticker");
        }
        warnings.extend(unresolved);

        if instruments.is_empty() {
            return Ok(DownloadReport {
                response: None,
                warnings,
            });
        }

        let mut groups = SeriesGroups::new();
        for instrument in &instruments {
            groups.register(instrument);
            let chunked = self.candela.fetch_partials(instrument, range).await?;
            for partial in chunked.partials {
                groups.push(partial);
            }
            warnings.extend(chunked.warnings);
        }

        let table = groups.into_wide_table()?;
        Ok(DownloadReport {
            response: Some(table),
            warnings,
        })
    }
}

impl Candela {
    /// Begin building a multi-ticker download.
    ///
    /// Typical usage: chain `benchmark`/`tickers`/`period` then call `run()`.
    #[must_use]
    pub const fn download(&'_ self) -> DownloadBuilder<'_> {
        DownloadBuilder::new(self)
    }
}
