mod segmenter_test;
mod staging_poller_test;
