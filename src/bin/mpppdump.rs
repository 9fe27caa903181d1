use std::env;

use mlppp::{
    layer::{
        iface::{LockPolicy, MpppIfaceBuilder, CFG_FLAG_SHORT_SEQ},
        link_hdr::{self, LinkHdr, LinkHdrBuilder, LinkHdrLookup},
        packet::PacketBuilder,
        pool::HeapBufPool,
        tx::MpppTxBuilder,
    },
    utils::buf::PktBuf,
};

const LONG_LINK_HDR: [u8; 8] = [0xff, 0x03, 0x00, 0x3d, 0, 0, 0, 0];
const SHORT_LINK_HDR: [u8; 6] = [0xff, 0x03, 0x00, 0x3d, 0, 0];

struct FixedLookup {
    short_seq: bool,
}

impl LinkHdrLookup for FixedLookup {
    fn resolve(&self, _iface_id: u32, _link_type: u16) -> Result<LinkHdr, link_hdr::Error> {
        let bytes = match self.short_seq {
            true => SHORT_LINK_HDR.to_vec(),
            false => LONG_LINK_HDR.to_vec(),
        };
        Ok(LinkHdrBuilder { bytes }.build())
    }
}

fn hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<String>>()
        .join(" ")
}

// usage: mpppdump [payload_len] [frag_weight] [short]
fn main() {
    let mut args = env::args().skip(1);
    let payload_len: usize = args
        .next()
        .map(|x| x.parse().expect("payload_len"))
        .unwrap_or(300);
    let frag_weight: usize = args
        .next()
        .map(|x| x.parse().expect("frag_weight"))
        .unwrap_or(128);
    let short_seq = args.next().as_deref() == Some("short");

    let link_hdr: &[u8] = match short_seq {
        true => &SHORT_LINK_HDR,
        false => &LONG_LINK_HDR,
    };

    let iface = MpppIfaceBuilder {
        iface_id: 1,
        cfg_flags: match short_seq {
            true => CFG_FLAG_SHORT_SEQ,
            false => 0,
        },
        frag_weight,
        lock_policy: LockPolicy::Always,
    }
    .build()
    .unwrap();

    let tx = MpppTxBuilder {
        pool: HeapBufPool,
        lookup: FixedLookup { short_seq },
    }
    .build();

    let mut buf = PktBuf::new(link_hdr.len() + payload_len + 64, 32);
    buf.append(link_hdr).unwrap();
    let payload: Vec<u8> = (0..payload_len).map(|x| x as u8).collect();
    buf.append(&payload).unwrap();
    let pkt = PacketBuilder {
        buf,
        desc_flags: 0,
        link_type: 1,
    }
    .build();

    println!(
        "payload {} bytes, fragment weight {}, {} sequence numbers",
        payload_len,
        frag_weight,
        match short_seq {
            true => "short",
            false => "long",
        }
    );

    match tx.encap_for_tx(&iface, pkt) {
        Ok(chain) => {
            for (i, frag) in chain.iter().enumerate() {
                println!("fragment {} ({} bytes): {}", i, frag.data_len(), hex(frag.data()));
            }
        }
        Err(err) => {
            println!("encapsulation failed: {:?}", err.kind);
        }
    }
}
