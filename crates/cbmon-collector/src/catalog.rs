//! Flattened metric names the collector is allowed to emit.
//!
//! Names are the full dotted path produced by the flattener:
//! `storage.*` from the cluster storage totals, `nodes.*` from the local node
//! entry, `bucket.quota.*` / `bucket.basic.*` from bucket details and
//! `bucket.op.*` from per-node bucket samples.

/// Collected in every mode.
pub const DEFAULT_METRICS: &[&str] = &[
    // cluster storage totals
    "storage.hdd.free",
    "storage.hdd.quotaTotal",
    "storage.hdd.total",
    "storage.hdd.used",
    "storage.hdd.usedByData",
    "storage.ram.quotaTotal",
    "storage.ram.quotaTotalPerNode",
    "storage.ram.quotaUsed",
    "storage.ram.quotaUsedPerNode",
    "storage.ram.total",
    "storage.ram.used",
    "storage.ram.usedByData",
    // local node
    "nodes.cmd_get",
    "nodes.couch_docs_actual_disk_size",
    "nodes.couch_docs_data_size",
    "nodes.couch_spatial_data_size",
    "nodes.couch_spatial_disk_size",
    "nodes.couch_views_actual_disk_size",
    "nodes.couch_views_data_size",
    "nodes.curr_items",
    "nodes.curr_items_tot",
    "nodes.ep_bg_fetched",
    "nodes.get_hits",
    "nodes.mcdMemoryAllocated",
    "nodes.mcdMemoryReserved",
    "nodes.mem_used",
    "nodes.memoryFree",
    "nodes.memoryTotal",
    "nodes.ops",
    "nodes.system.cpu_utilization_rate",
    "nodes.system.mem_free",
    "nodes.system.mem_total",
    "nodes.system.swap_total",
    "nodes.system.swap_used",
    "nodes.vb_replica_curr_items",
    // bucket details
    "bucket.basic.dataUsed",
    "bucket.basic.diskFetches",
    "bucket.basic.diskUsed",
    "bucket.basic.itemCount",
    "bucket.basic.memUsed",
    "bucket.basic.opsPerSec",
    "bucket.basic.quotaPercentUsed",
    "bucket.quota.ram",
    "bucket.quota.rawRAM",
    // per-node bucket samples
    "bucket.op.cmd_get",
    "bucket.op.couch_docs_fragmentation",
    "bucket.op.couch_total_disk_size",
    "bucket.op.couch_views_fragmentation",
    "bucket.op.couch_views_ops",
    "bucket.op.cpu_utilization_rate",
    "bucket.op.curr_connections",
    "bucket.op.curr_items",
    "bucket.op.curr_items_tot",
    "bucket.op.disk_write_queue",
    "bucket.op.ep_bg_fetched",
    "bucket.op.ep_cache_miss_rate",
    "bucket.op.ep_diskqueue_drain",
    "bucket.op.ep_diskqueue_fill",
    "bucket.op.ep_mem_high_wat",
    "bucket.op.ep_mem_low_wat",
    "bucket.op.ep_num_value_ejects",
    "bucket.op.ep_oom_errors",
    "bucket.op.ep_queue_size",
    "bucket.op.ep_tmp_oom_errors",
    "bucket.op.get_hits",
    "bucket.op.get_misses",
    "bucket.op.mem_used",
    "bucket.op.ops",
    "bucket.op.vb_active_resident_items_ratio",
    "bucket.op.vb_replica_curr_items",
];

/// Additionally collected when a target runs in `detailed` mode.
pub const DETAILED_METRICS: &[&str] = &[
    // local node
    "nodes.couch_docs_disk_size",
    "nodes.system.mem_actual_free",
    "nodes.system.mem_actual_used",
    "nodes.system.mem_limit",
    "nodes.uptime",
    "nodes.vb_active_num_non_resident",
    // bucket details
    "bucket.basic.vbActiveNumNonResident",
    // per-node bucket samples
    "bucket.op.avg_active_timestamp_drift",
    "bucket.op.avg_bg_wait_time",
    "bucket.op.avg_disk_commit_time",
    "bucket.op.avg_disk_update_time",
    "bucket.op.avg_replica_timestamp_drift",
    "bucket.op.bg_wait_count",
    "bucket.op.bg_wait_total",
    "bucket.op.bytes_read",
    "bucket.op.bytes_written",
    "bucket.op.cas_badval",
    "bucket.op.cas_hits",
    "bucket.op.cas_misses",
    "bucket.op.cmd_set",
    "bucket.op.couch_docs_actual_disk_size",
    "bucket.op.couch_docs_data_size",
    "bucket.op.couch_docs_disk_size",
    "bucket.op.couch_spatial_data_size",
    "bucket.op.couch_spatial_disk_size",
    "bucket.op.couch_spatial_ops",
    "bucket.op.couch_views_actual_disk_size",
    "bucket.op.couch_views_data_size",
    "bucket.op.couch_views_disk_size",
    "bucket.op.cpu_idle_ms",
    "bucket.op.cpu_local_ms",
    "bucket.op.decr_hits",
    "bucket.op.decr_misses",
    "bucket.op.delete_hits",
    "bucket.op.delete_misses",
    "bucket.op.disk_commit_count",
    "bucket.op.disk_commit_total",
    "bucket.op.disk_update_count",
    "bucket.op.disk_update_total",
    "bucket.op.disk_write_queue",
    "bucket.op.ep_active_ahead_exceptions",
    "bucket.op.ep_active_hlc_drift",
    "bucket.op.ep_active_hlc_drift_count",
    "bucket.op.ep_bg_fetched",
    "bucket.op.ep_clock_cas_drift_threshold_exceeded",
    "bucket.op.ep_dcp_2i_backoff",
    "bucket.op.ep_dcp_2i_count",
    "bucket.op.ep_dcp_2i_items_remaining",
    "bucket.op.ep_dcp_2i_items_sent",
    "bucket.op.ep_dcp_2i_producer_count",
    "bucket.op.ep_dcp_2i_total_backlog_size",
    "bucket.op.ep_dcp_2i_total_bytes",
    "bucket.op.ep_dcp_other_backoff",
    "bucket.op.ep_dcp_other_count",
    "bucket.op.ep_dcp_other_items_remaining",
    "bucket.op.ep_dcp_other_items_sent",
    "bucket.op.ep_dcp_other_producer_count",
    "bucket.op.ep_dcp_other_total_backlog_size",
    "bucket.op.ep_dcp_other_total_bytes",
    "bucket.op.ep_dcp_replica_backoff",
    "bucket.op.ep_dcp_replica_count",
    "bucket.op.ep_dcp_replica_items_remaining",
    "bucket.op.ep_dcp_replica_items_sent",
    "bucket.op.ep_dcp_replica_producer_count",
    "bucket.op.ep_dcp_replica_total_backlog_size",
    "bucket.op.ep_dcp_replica_total_bytes",
    "bucket.op.ep_dcp_views_backoff",
    "bucket.op.ep_dcp_views_count",
    "bucket.op.ep_dcp_views_items_remaining",
    "bucket.op.ep_dcp_views_items_sent",
    "bucket.op.ep_dcp_views_producer_count",
    "bucket.op.ep_dcp_views_total_backlog_size",
    "bucket.op.ep_dcp_views_total_bytes",
    "bucket.op.ep_dcp_xdcr_backoff",
    "bucket.op.ep_dcp_xdcr_count",
    "bucket.op.ep_dcp_xdcr_items_remaining",
    "bucket.op.ep_dcp_xdcr_items_sent",
    "bucket.op.ep_dcp_xdcr_producer_count",
    "bucket.op.ep_dcp_xdcr_total_backlog_size",
    "bucket.op.ep_dcp_xdcr_total_bytes",
    "bucket.op.ep_diskqueue_items",
    "bucket.op.ep_flusher_todo",
    "bucket.op.ep_item_commit_failed",
    "bucket.op.ep_kv_size",
    "bucket.op.ep_max_size",
    "bucket.op.ep_meta_data_memory",
    "bucket.op.ep_num_non_resident",
    "bucket.op.ep_num_ops_del_meta",
    "bucket.op.ep_num_ops_del_ret_meta",
    "bucket.op.ep_num_ops_get_meta",
    "bucket.op.ep_num_ops_set_meta",
    "bucket.op.ep_num_ops_set_ret_meta",
    "bucket.op.ep_ops_create",
    "bucket.op.ep_ops_update",
    "bucket.op.ep_overhead",
    "bucket.op.ep_replica_ahead_exceptions",
    "bucket.op.ep_replica_hlc_drift",
    "bucket.op.ep_replica_hlc_drift_count",
    "bucket.op.ep_resident_items_rate",
    "bucket.op.ep_vb_total",
    "bucket.op.evictions",
    "bucket.op.get_hits",
    "bucket.op.hibernated_requests",
    "bucket.op.hibernated_waked",
    "bucket.op.hit_ratio",
    "bucket.op.incr_hits",
    "bucket.op.incr_misses",
    "bucket.op.mem_actual_free",
    "bucket.op.mem_actual_used",
    "bucket.op.mem_free",
    "bucket.op.mem_total",
    "bucket.op.misses",
    "bucket.op.rest_requests",
    "bucket.op.swap_total",
    "bucket.op.swap_used",
    "bucket.op.vb_active_eject",
    "bucket.op.vb_active_itm_memory",
    "bucket.op.vb_active_meta_data_memory",
    "bucket.op.vb_active_num",
    "bucket.op.vb_active_num_non_resident",
    "bucket.op.vb_active_ops_create",
    "bucket.op.vb_active_ops_update",
    "bucket.op.vb_active_queue_age",
    "bucket.op.vb_active_queue_drain",
    "bucket.op.vb_active_queue_fill",
    "bucket.op.vb_active_queue_size",
    "bucket.op.vb_active_sync_write_aborted_count",
    "bucket.op.vb_active_sync_write_accepted_count",
    "bucket.op.vb_active_sync_write_committed_count",
    "bucket.op.vb_avg_active_queue_age",
    "bucket.op.vb_avg_pending_queue_age",
    "bucket.op.vb_avg_replica_queue_age",
    "bucket.op.vb_avg_total_queue_age",
    "bucket.op.vb_pending_curr_items",
    "bucket.op.vb_pending_eject",
    "bucket.op.vb_pending_itm_memory",
    "bucket.op.vb_pending_meta_data_memory",
    "bucket.op.vb_pending_num",
    "bucket.op.vb_pending_num_non_resident",
    "bucket.op.vb_pending_ops_create",
    "bucket.op.vb_pending_ops_update",
    "bucket.op.vb_pending_queue_age",
    "bucket.op.vb_pending_queue_drain",
    "bucket.op.vb_pending_queue_fill",
    "bucket.op.vb_pending_queue_size",
    "bucket.op.vb_pending_resident_items_ratio",
    "bucket.op.vb_replica_eject",
    "bucket.op.vb_replica_itm_memory",
    "bucket.op.vb_replica_meta_data_memory",
    "bucket.op.vb_replica_num",
    "bucket.op.vb_replica_num_non_resident",
    "bucket.op.vb_replica_ops_create",
    "bucket.op.vb_replica_ops_update",
    "bucket.op.vb_replica_queue_age",
    "bucket.op.vb_replica_queue_drain",
    "bucket.op.vb_replica_queue_fill",
    "bucket.op.vb_replica_queue_size",
    "bucket.op.vb_replica_resident_items_ratio",
    "bucket.op.vb_total_queue_age",
    "bucket.op.xdc_ops",
];
