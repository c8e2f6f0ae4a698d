//! Full VM lifecycle against the IDCloudHost API.
//!
//! Creates a private network and a VM attached to it, resizes the VM,
//! then tears both down. Credentials come from `IDCLOUDHOST_*` variables
//! (a `.env` file is honoured).

use idcloudhost_provisioner::{
    IdcloudhostClient, IdcloudhostResult, PrivateNetworkRecord, ResourceAdapter, VmPassword,
    VmRecord,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> IdcloudhostResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("idcloudhost_provisioner=debug")),
        )
        .init();

    let client = IdcloudhostClient::from_env()?;
    let billing_account_id: i64 = std::env::var("IDCLOUDHOST_BILLING_ACCOUNT")
        .expect("IDCLOUDHOST_BILLING_ACCOUNT not set")
        .parse()
        .expect("invalid billing account id");

    // 1. A private network for the VM.
    let networks = client.private_networks();
    let network = networks
        .create(PrivateNetworkRecord::new("demo-backend"))
        .await?;
    let network_uuid = network.uuid.clone().unwrap_or_default();
    println!("Network {} created", network_uuid);

    // 2. The VM itself.
    let vms = client.vms();
    let vm = vms
        .create(VmRecord {
            id: None,
            location: None,
            name: "demo-web".to_string(),
            billing_account_id,
            username: "deploy".to_string(),
            password: VmPassword::new_unchecked("Demo-Passw0rd!2024"),
            os_name: "ubuntu".to_string(),
            os_version: "22.04".to_string(),
            vcpu: 1,
            ram: 1024,
            disks: 20,
            disks_uuid: None,
            private_network_uuid: network_uuid,
            float_ip_address: None,
            desired_status: None,
        })
        .await?;
    println!(
        "VM {} created: {} vCPU, {} MB, disk {}",
        vm.id.as_deref().unwrap_or("?"),
        vm.vcpu,
        vm.ram,
        vm.disks_uuid.as_deref().unwrap_or("?")
    );

    // 3. Scale it up: one compute call, one disk call, then a read.
    let mut desired = vm.clone();
    desired.vcpu = 2;
    desired.ram = 2048;
    desired.disks = 40;
    let vm = vms.update(&vm, desired).await?;
    println!("VM resized to {} vCPU / {} MB / {} GB", vm.vcpu, vm.ram, vm.disks);

    // 4. Tear down.
    vms.delete(&vm).await?;
    networks.delete(&network).await?;
    println!("Cleaned up");

    Ok(())
}
