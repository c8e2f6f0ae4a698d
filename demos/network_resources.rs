//! Floating IPs and storage buckets.
//!
//! Allocates a floating IP, binds it to an existing VM through the VM
//! adapter, and manages a bucket on the global storage endpoint.

use idcloudhost_provisioner::{
    FloatingIpRecord, IdcloudhostClient, IdcloudhostResult, ResourceAdapter, StorageBucketRecord,
};

#[tokio::main]
async fn main() -> IdcloudhostResult<()> {
    tracing_subscriber::fmt().init();

    let client = IdcloudhostClient::builder()
        .api_key(std::env::var("IDCLOUDHOST_API_KEY").expect("IDCLOUDHOST_API_KEY not set"))?
        .default_location("jkt01")?
        .rate_limit(5, 5)
        .build()?;
    let billing_account_id: i64 = std::env::var("IDCLOUDHOST_BILLING_ACCOUNT")
        .expect("IDCLOUDHOST_BILLING_ACCOUNT not set")
        .parse()
        .expect("invalid billing account id");

    // Floating IP
    let ips = client.floating_ips();
    let ip = ips
        .create(FloatingIpRecord::new("demo-public", billing_account_id))
        .await?;
    let address = ip.address.clone().unwrap_or_default();
    println!("Allocated {}", address);

    if let Ok(vm_id) = std::env::var("IDCLOUDHOST_DEMO_VM_UUID") {
        let vms = client.vms();
        let vm = vms.import(&vm_id).await?;
        let mut desired = vm.clone();
        desired.float_ip_address = Some(address.clone());
        let vm = vms.update(&vm, desired).await?;
        println!("{} now reachable at {}", vm.name, vm.float_ip().unwrap_or("-"));

        let mut detached = vm.clone();
        detached.float_ip_address = None;
        vms.update(&vm, detached).await?;
    }

    ips.delete(&ip).await?;

    // Storage bucket
    let buckets = client.storage_buckets();
    let bucket = buckets
        .create(StorageBucketRecord {
            name: "demo-backups".to_string(),
            billing_account_id,
        })
        .await?;
    println!("Bucket {} billed to {}", bucket.name, bucket.billing_account_id);
    buckets.delete(&bucket).await?;

    Ok(())
}
