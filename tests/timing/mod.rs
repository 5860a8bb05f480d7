//! Timing tests: races and demos finish within their bounded sleep totals
