pub(crate) mod champion;
