//! Chains of results handed to callers.
//!
//! The query functions in [`reply`][super::reply] return their results as
//! a [`DataChain`], a singly linked list of [`DataNode`]s. The server list
//! of a [`Channel`][super::Channel] is exchanged the same way. Every node
//! carries a [`DataPayload`] describing its own type and a mark that
//! identifies it as having been allocated by this module. Chains are
//! released through [`free_data`] which walks the chain node by node and
//! stops at the first node that doesn’t carry the mark.
//!
//! Chains are built through a [`ChainBuilder`]. If building fails halfway,
//! dropping the builder releases everything collected so far.

use super::error::Error;
use super::servers::{AddrNode, AddrPortNode};
use crate::rdata::{
    CaaReply, MxReply, NaptrReply, SoaReply, SrvReply, TxtReply, UriReply,
};
use core::fmt;
use tracing::warn;

//------------ Module Configuration ------------------------------------------

/// The mark carried by every node allocated by this module.
const DATA_MARK: u32 = 0xbead;

//------------ DataType ------------------------------------------------------

/// The type of the payload of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataType {
    Caa,
    Mx,
    Naptr,
    Soa,
    Srv,
    Txt,
    Uri,
    AddrNode,
    AddrPortNode,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            DataType::Caa => "CAA",
            DataType::Mx => "MX",
            DataType::Naptr => "NAPTR",
            DataType::Soa => "SOA",
            DataType::Srv => "SRV",
            DataType::Txt => "TXT",
            DataType::Uri => "URI",
            DataType::AddrNode => "address",
            DataType::AddrPortNode => "address and port",
        })
    }
}

//------------ DataPayload ---------------------------------------------------

/// The payload of a node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataPayload {
    Caa(CaaReply),
    Mx(MxReply),
    Naptr(NaptrReply),
    Soa(SoaReply),
    Srv(SrvReply),
    Txt(TxtReply),
    Uri(UriReply),
    AddrNode(AddrNode),
    AddrPortNode(AddrPortNode),
}

impl DataPayload {
    /// Creates an empty payload of the given type.
    pub fn empty(data_type: DataType) -> Self {
        match data_type {
            DataType::Caa => DataPayload::Caa(Default::default()),
            DataType::Mx => DataPayload::Mx(Default::default()),
            DataType::Naptr => DataPayload::Naptr(Default::default()),
            DataType::Soa => DataPayload::Soa(Default::default()),
            DataType::Srv => DataPayload::Srv(Default::default()),
            DataType::Txt => DataPayload::Txt(Default::default()),
            DataType::Uri => DataPayload::Uri(Default::default()),
            DataType::AddrNode => DataPayload::AddrNode(Default::default()),
            DataType::AddrPortNode => {
                DataPayload::AddrPortNode(Default::default())
            }
        }
    }

    /// Returns the type of the payload.
    pub fn data_type(&self) -> DataType {
        match self {
            DataPayload::Caa(_) => DataType::Caa,
            DataPayload::Mx(_) => DataType::Mx,
            DataPayload::Naptr(_) => DataType::Naptr,
            DataPayload::Soa(_) => DataType::Soa,
            DataPayload::Srv(_) => DataType::Srv,
            DataPayload::Txt(_) => DataType::Txt,
            DataPayload::Uri(_) => DataType::Uri,
            DataPayload::AddrNode(_) => DataType::AddrNode,
            DataPayload::AddrPortNode(_) => DataType::AddrPortNode,
        }
    }

    pub fn as_caa(&self) -> Option<&CaaReply> {
        match self {
            DataPayload::Caa(caa) => Some(caa),
            _ => None,
        }
    }

    pub fn as_mx(&self) -> Option<&MxReply> {
        match self {
            DataPayload::Mx(mx) => Some(mx),
            _ => None,
        }
    }

    pub fn as_naptr(&self) -> Option<&NaptrReply> {
        match self {
            DataPayload::Naptr(naptr) => Some(naptr),
            _ => None,
        }
    }

    pub fn as_soa(&self) -> Option<&SoaReply> {
        match self {
            DataPayload::Soa(soa) => Some(soa),
            _ => None,
        }
    }

    pub fn as_srv(&self) -> Option<&SrvReply> {
        match self {
            DataPayload::Srv(srv) => Some(srv),
            _ => None,
        }
    }

    pub fn as_txt(&self) -> Option<&TxtReply> {
        match self {
            DataPayload::Txt(txt) => Some(txt),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&UriReply> {
        match self {
            DataPayload::Uri(uri) => Some(uri),
            _ => None,
        }
    }

    pub fn as_addr_node(&self) -> Option<&AddrNode> {
        match self {
            DataPayload::AddrNode(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_addr_port_node(&self) -> Option<&AddrPortNode> {
        match self {
            DataPayload::AddrPortNode(node) => Some(node),
            _ => None,
        }
    }
}

//--- From

impl From<CaaReply> for DataPayload {
    fn from(caa: CaaReply) -> Self {
        DataPayload::Caa(caa)
    }
}

impl From<MxReply> for DataPayload {
    fn from(mx: MxReply) -> Self {
        DataPayload::Mx(mx)
    }
}

impl From<NaptrReply> for DataPayload {
    fn from(naptr: NaptrReply) -> Self {
        DataPayload::Naptr(naptr)
    }
}

impl From<SoaReply> for DataPayload {
    fn from(soa: SoaReply) -> Self {
        DataPayload::Soa(soa)
    }
}

impl From<SrvReply> for DataPayload {
    fn from(srv: SrvReply) -> Self {
        DataPayload::Srv(srv)
    }
}

impl From<TxtReply> for DataPayload {
    fn from(txt: TxtReply) -> Self {
        DataPayload::Txt(txt)
    }
}

impl From<UriReply> for DataPayload {
    fn from(uri: UriReply) -> Self {
        DataPayload::Uri(uri)
    }
}

impl From<AddrNode> for DataPayload {
    fn from(node: AddrNode) -> Self {
        DataPayload::AddrNode(node)
    }
}

impl From<AddrPortNode> for DataPayload {
    fn from(node: AddrPortNode) -> Self {
        DataPayload::AddrPortNode(node)
    }
}

//------------ DataNode ------------------------------------------------------

/// A single node of a chain.
#[derive(Debug)]
pub struct DataNode {
    mark: u32,
    payload: DataPayload,
    next: Option<Box<DataNode>>,
}

impl DataNode {
    /// Allocates a node with an empty payload of the given type.
    pub fn alloc(data_type: DataType) -> Box<Self> {
        Self::with_payload(DataPayload::empty(data_type))
    }

    /// Allocates a node for the given payload.
    pub fn with_payload(payload: DataPayload) -> Box<Self> {
        Box::new(DataNode {
            mark: DATA_MARK,
            payload,
            next: None,
        })
    }

    /// Returns whether the node carries the mark of this module.
    pub fn is_valid(&self) -> bool {
        self.mark == DATA_MARK
    }

    pub fn data_type(&self) -> DataType {
        self.payload.data_type()
    }

    pub fn payload(&self) -> &DataPayload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut DataPayload {
        &mut self.payload
    }

    /// Returns the next node of the chain if there is one.
    pub fn next(&self) -> Option<&DataNode> {
        self.next.as_deref()
    }
}

//------------ DataChain -----------------------------------------------------

/// A chain of result nodes.
///
/// An empty chain is a valid result. It is what the query functions return
/// if the response did not contain any matching records.
#[derive(Default)]
pub struct DataChain {
    head: Option<Box<DataNode>>,
}

impl DataChain {
    /// Creates a new, empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first node of the chain.
    pub fn head(&self) -> Option<&DataNode> {
        self.head.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    /// Returns an iterator over the nodes of the chain.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            next: self.head.as_deref(),
        }
    }

    /// Returns an iterator over the payloads of the chain.
    pub fn iter(&self) -> impl Iterator<Item = &DataPayload> {
        self.nodes().map(DataNode::payload)
    }

    #[cfg(test)]
    fn node_mut(&mut self, idx: usize) -> Option<&mut DataNode> {
        let mut node = self.head.as_deref_mut();
        for _ in 0..idx {
            node = node?.next.as_deref_mut();
        }
        node
    }
}

//--- Drop

impl Drop for DataChain {
    fn drop(&mut self) {
        // Unlink iteratively so long chains don’t exhaust the stack.
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

//--- Debug

impl fmt::Debug for DataChain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

//------------ Nodes ---------------------------------------------------------

/// An iterator over the nodes of a chain.
#[derive(Clone, Debug)]
pub struct Nodes<'a> {
    next: Option<&'a DataNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a DataNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next();
        Some(node)
    }
}

//------------ ChainBuilder --------------------------------------------------

/// Collects payloads in order and links them into a chain.
#[derive(Debug, Default)]
pub struct ChainBuilder {
    nodes: Vec<Box<DataNode>>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a payload to the end of the chain under construction.
    pub fn push(
        &mut self,
        payload: impl Into<DataPayload>,
    ) -> Result<(), Error> {
        self.nodes.try_reserve(1).map_err(|_| Error::NoMemory)?;
        self.nodes.push(DataNode::with_payload(payload.into()));
        Ok(())
    }

    /// Appends all payloads produced by `iter`.
    pub fn extend<T: Into<DataPayload>>(
        &mut self,
        iter: impl IntoIterator<Item = T>,
    ) -> Result<(), Error> {
        for item in iter {
            self.push(item)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Links the collected nodes into a chain.
    pub fn finish(self) -> DataChain {
        let mut head = None;
        for mut node in self.nodes.into_iter().rev() {
            node.next = head;
            head = Some(node);
        }
        DataChain { head }
    }
}

//------------ free_data -----------------------------------------------------

/// Releases a chain returned by one of the query functions.
///
/// The chain is released node by node, starting at its head. If a node is
/// encountered that doesn’t carry the mark of this module, releasing stops
/// and the remainder of the chain starting at that node is returned
/// untouched. Otherwise returns `None`.
///
/// Releasing an empty chain does nothing.
pub fn free_data(mut chain: DataChain) -> Option<DataChain> {
    while let Some(mut node) = chain.head.take() {
        if !node.is_valid() {
            warn!(
                "refusing to free foreign {} node with mark {:#x}",
                node.data_type(),
                node.mark
            );
            chain.head = Some(node);
            return Some(chain);
        }
        chain.head = node.next.take();
    }
    None
}

//============ Testing =======================================================
