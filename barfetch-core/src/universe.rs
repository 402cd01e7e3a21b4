//! Built-in universe: the ticker lists used when no config file is given.
//!
//! Symbols are Yahoo Finance symbols: futures carry `=F`, crypto pairs `-USD`,
//! share classes a dot (`BF.B`).

use crate::config::BatchSpec;

/// S&P 500 constituents, grouped by sector.
pub const SP500_TICKERS: &[&str] = &[
    // Technology
    "AAPL", "MSFT", "GOOGL", "GOOG", "NVDA", "META", "TSLA", "AVGO", "CSCO", "ACN",
    "ADBE", "CRM", "INTC", "AMD", "QCOM", "TXN", "ORCL", "NOW", "IBM", "INTU",
    "AMAT", "MU", "ADI", "LRCX", "KLAC", "SNPS", "CDNS", "PANW", "CRWD", "ADSK",
    "MSCI", "ROP", "FTNT", "MCHP", "ANSS", "HPQ", "NTAP", "TEAM", "WDAY", "ZS",
    "DDOG", "SNOW", "NET", "AKAM", "VRSN", "JNPR", "FFIV", "GDDY", "ENPH", "ON",
    "SMCI", "DELL", "HPE", "WDC", "STX", "NXPI", "MRVL", "SWKS", "QRVO", "MPWR",
    "FSLR", "TER", "GLW", "APH", "TYL", "ZBRA", "KEYS", "EPAM", "GEN", "PLTR",
    // Finance
    "JPM", "V", "MA", "BAC", "WFC", "MS", "GS", "BLK", "C", "SCHW",
    "AXP", "SPGI", "CB", "PGR", "MMC", "USB", "PNC", "AON", "TFC", "CME",
    "ICE", "TRV", "AIG", "AFL", "ALL", "MET", "PRU", "FIS", "AJG", "FITB",
    "BK", "STT", "COF", "DFS", "TROW", "BEN", "RF", "KEY", "CFG", "HBAN",
    "CINF", "NTRS", "MTB", "SYF", "L", "GL", "WRB", "IVZ", "ZION", "RJF",
    "JKHY", "BRO", "EQH", "AIZ", "RE", "FNF", "PFG", "AMP", "CBOE", "NDAQ",
    // Healthcare
    "UNH", "JNJ", "LLY", "ABBV", "MRK", "TMO", "ABT", "DHR", "PFE", "BMY",
    "AMGN", "SYK", "GILD", "VRTX", "CVS", "CI", "REGN", "BSX", "MDT", "ISRG",
    "ELV", "ZTS", "HCA", "MCK", "COR", "HUM", "DXCM", "A", "IQV", "BDX",
    "EW", "RMD", "IDXX", "STE", "ALGN", "MTD", "WST", "HOLX", "PODD", "DGX",
    "LH", "CRL", "CAH", "VTRS", "TECH", "TFX", "RVTY", "COO", "BAX", "GEHC",
    "WAT", "HSIC", "MRNA", "BIIB", "INCY", "EXAS", "MOH", "DVA", "UHS", "HLF",
    // Consumer discretionary
    "AMZN", "WMT", "HD", "MCD", "NKE", "COST", "SBUX", "LOW", "TGT", "TJX",
    "BKNG", "CMG", "MAR", "ORLY", "AZO", "HLT", "ABNB", "GM", "F", "YUM",
    "ROST", "DHI", "LEN", "DG", "DLTR", "TSCO", "EBAY", "ETSY", "POOL", "ULTA",
    "BBY", "GPC", "DPZ", "DECK", "NVR", "PHM", "KMX", "TPR", "RL", "UAA",
    "NCLH", "RCL", "CCL", "LVS", "MGM", "WYNN", "CZR", "PENN", "MHK", "WHR",
    // Consumer staples
    "PG", "KO", "PEP", "MDLZ", "PM", "MO", "CL", "GIS", "KMB", "MNST",
    "KHC", "HSY", "SYY", "K", "CLX", "TSN", "HRL", "CAG", "CPB", "MKC",
    "CHD", "TAP", "LW", "KR", "SJM", "BG", "ADM", "EL", "STZ", "KDP",
    "WBA", "BF.B", "COKE", "DINO", "SPB", "POST", "INGR", "FLO",
    // Energy
    "XOM", "CVX", "COP", "SLB", "EOG", "MPC", "PSX", "VLO", "OXY", "PXD",
    "HES", "WMB", "KMI", "HAL", "BKR", "DVN", "FANG", "MRO", "OKE", "TRGP",
    "EQT", "APA", "CTRA", "TPL", "CNQ", "SU", "IMO", "CVE", "TRP", "ENB",
    // Industrials
    "UNP", "RTX", "HON", "UPS", "CAT", "DE", "BA", "GE", "LMT", "MMM",
    "ADP", "GD", "ITW", "NOC", "EMR", "ETN", "PCAR", "TT", "PH", "CARR",
    "JCI", "FDX", "NSC", "CMI", "OTIS", "ROK", "AME", "FAST", "PAYX", "VRSK",
    "ODFL", "IR", "WM", "RSG", "XYL", "IEX", "CPRT", "LDOS", "URI", "PWR",
    "J", "SWK", "CHRW", "EXPD", "WAB", "DOV", "HUBB", "GNRC", "AOS", "BLDR",
    // Materials
    "LIN", "APD", "SHW", "FCX", "ECL", "NEM", "CTVA", "DD", "NUE", "DOW",
    "VMC", "MLM", "PPG", "ALB", "BALL", "AVY", "AMCR", "PKG", "IP", "CE",
    "EMN", "CF", "MOS", "FMC", "IFF", "LYB", "SEE", "WRK", "HUN", "NTR",
    // Real estate
    "PLD", "AMT", "EQIX", "CCI", "PSA", "WELL", "DLR", "O", "SBAC", "VICI",
    "AVB", "EQR", "SPG", "ARE", "VTR", "INVH", "MAA", "ESS", "KIM", "REG",
    "UDR", "HST", "BXP", "PEAK", "DOC", "FRT", "CPT", "AIV", "VNO", "SLG",
    // Utilities
    "NEE", "SO", "DUK", "D", "AEP", "EXC", "SRE", "XEL", "PEG", "ED",
    "EIX", "WEC", "ES", "AWK", "DTE", "PPL", "FE", "AEE", "ETR", "CMS",
    "CNP", "NI", "LNT", "EVRG", "ATO", "PNW", "NWE", "OGE", "AVA", "SJW",
    // Communications
    "DIS", "NFLX", "CMCSA", "VZ", "T", "TMUS", "CHTR", "EA", "TTWO", "MTCH",
];

/// Broad-market ETFs.
pub const ETF_TICKERS: &[&str] = &["SPY", "QQQ", "IWM", "DIA"];

/// Front-month futures: gold, silver, crude oil, natural gas, copper.
pub const COMMODITY_TICKERS: &[&str] = &["GC=F", "SI=F", "CL=F", "NG=F", "HG=F"];

/// USD crypto pairs.
pub const CRYPTO_TICKERS: &[&str] = &["BTC-USD", "ETH-USD", "DOGE-USD", "SOL-USD"];

/// The four built-in batches, in fetch order.
pub fn default_batches() -> Vec<BatchSpec> {
    vec![
        BatchSpec::new("S&P 500 Stocks", "stocks", SP500_TICKERS),
        BatchSpec::new("ETFs", "etfs", ETF_TICKERS),
        BatchSpec::new("Commodities", "commodities", COMMODITY_TICKERS),
        BatchSpec::new("Cryptocurrencies", "crypto", CRYPTO_TICKERS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn built_in_lists_have_no_duplicates() {
        for batch in default_batches() {
            let unique: HashSet<&String> = batch.tickers.iter().collect();
            assert_eq!(unique.len(), batch.tickers.len(), "{}", batch.category);
        }
    }

    #[test]
    fn default_batches_cover_every_asset_class() {
        let subdirs: Vec<String> = default_batches().into_iter().map(|b| b.subdir).collect();
        assert_eq!(subdirs, vec!["stocks", "etfs", "commodities", "crypto"]);
    }

    #[test]
    fn stock_universe_size() {
        assert!(SP500_TICKERS.len() > 440);
        assert!(SP500_TICKERS.contains(&"BF.B"));
    }
}
